//! Business logic services
//!
//! Sits between the REST layer and the repositories.

use crate::core::error::{AppError, Result};
use crate::db::models::AirportRecord;
use crate::db::repository::AirportRepository;
use std::sync::Arc;

/// Message returned when a search matches nothing
pub const NO_AIRPORT_FOUND: &str = "No airport found with that name or ident";

/// Airport lookup service
pub struct AirportService {
    airport_repo: Arc<AirportRepository>,
}

impl AirportService {
    /// Create a new AirportService
    pub fn new(airport_repo: Arc<AirportRepository>) -> Self {
        Self { airport_repo }
    }

    /// Airports whose name or ident contains `query`, ignoring case
    ///
    /// An empty result is reported as `NotFound`.
    pub async fn find_by_name_or_ident(&self, query: &str) -> Result<Vec<AirportRecord>> {
        let airports = self.airport_repo.search(query).await?;

        if airports.is_empty() {
            return Err(AppError::NotFound(NO_AIRPORT_FOUND.to_string()));
        }

        tracing::debug!(query = %query, matches = airports.len(), "Airport search completed");
        Ok(airports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures;

    fn service() -> AirportService {
        let repo = Arc::new(AirportRepository::new(fixtures::seeded_manager()));
        AirportService::new(repo)
    }

    #[tokio::test]
    async fn test_matches_are_returned() {
        let airports = service().find_by_name_or_ident("Guardia").await.unwrap();
        assert_eq!(airports.len(), 1);
        assert_eq!(airports[0].airport.ident, "KLGA");
    }

    #[tokio::test]
    async fn test_empty_result_is_not_found() {
        let result = service().find_by_name_or_ident("ZZZZ").await;
        match result {
            Err(AppError::NotFound(message)) => assert_eq!(message, NO_AIRPORT_FOUND),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
