//! API key gate
//!
//! Every request is checked from scratch against the `api_keys` table; no
//! decision is cached. Unknown keys and inactive keys are rejected with the
//! same reason so callers cannot tell them apart.

use crate::core::config::SecurityConfig;
use crate::core::error::{AppError, Result};
use crate::db::manager::DatabaseManager;
use crate::db::repository::ApiKeyRepository;
use axum::http::HeaderName;
use std::sync::Arc;

/// Why a request was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthRejection {
    #[error("Missing API key")]
    Missing,

    #[error("Invalid or inactive API key")]
    InvalidOrInactive,
}

/// Proof that the presented key is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authorized {
    pub key_id: i64,
}

/// Validates caller-supplied keys against the store
pub struct ApiKeyGate {
    keys: ApiKeyRepository,
    header: HeaderName,
}

impl ApiKeyGate {
    /// Create a gate reading keys from the header named in `config`
    pub fn new(db: Arc<DatabaseManager>, config: &SecurityConfig) -> Result<Self> {
        let header = HeaderName::from_bytes(config.api_key_header.trim().as_bytes()).map_err(|e| {
            AppError::ConfigError(format!(
                "invalid api_key_header '{}': {}",
                config.api_key_header, e
            ))
        })?;

        Ok(Self {
            keys: ApiKeyRepository::new(db),
            header,
        })
    }

    /// Header the key is read from
    pub fn header_name(&self) -> &HeaderName {
        &self.header
    }

    /// Check a presented key
    ///
    /// Absent, empty or whitespace-only keys are `Missing`; anything that is
    /// not an active row is `InvalidOrInactive`. Store failures propagate as
    /// server errors.
    pub async fn authorize(&self, presented: Option<&str>) -> Result<Authorized> {
        let key = match presented {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(AuthRejection::Missing.into()),
        };

        match self.keys.find_active(key).await? {
            Some(row) => Ok(Authorized { key_id: row.id }),
            None => Err(AuthRejection::InvalidOrInactive.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::db::fixtures::{self, ACTIVE_KEY, INACTIVE_KEY};

    fn gate() -> ApiKeyGate {
        let config = Config::defaults().unwrap();
        ApiKeyGate::new(fixtures::seeded_manager(), &config.security).unwrap()
    }

    fn rejection(result: Result<Authorized>) -> AuthRejection {
        match result {
            Err(AppError::AuthenticationError(reason)) => reason,
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_active_key_is_authorized() {
        let authorized = gate().authorize(Some(ACTIVE_KEY)).await.unwrap();
        assert!(authorized.key_id > 0);
    }

    #[tokio::test]
    async fn test_missing_key() {
        let gate = gate();
        assert_eq!(rejection(gate.authorize(None).await), AuthRejection::Missing);
        assert_eq!(rejection(gate.authorize(Some("")).await), AuthRejection::Missing);
        assert_eq!(rejection(gate.authorize(Some("   ")).await), AuthRejection::Missing);
    }

    #[tokio::test]
    async fn test_unknown_and_inactive_keys_look_the_same() {
        let gate = gate();
        let inactive = rejection(gate.authorize(Some(INACTIVE_KEY)).await);
        let unknown = rejection(gate.authorize(Some("never-issued")).await);

        assert_eq!(inactive, AuthRejection::InvalidOrInactive);
        assert_eq!(inactive, unknown);
        assert_eq!(inactive.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn test_store_failure_is_not_a_rejection() {
        let db = Arc::new(DatabaseManager::new_in_memory().unwrap());
        db.get_connection()
            .unwrap()
            .execute_batch("DROP TABLE api_keys")
            .unwrap();

        let config = Config::defaults().unwrap();
        let gate = ApiKeyGate::new(db, &config.security).unwrap();
        let result = gate.authorize(Some(ACTIVE_KEY)).await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }

    #[test]
    fn test_header_name_from_config() {
        let mut config = Config::defaults().unwrap();
        config.security.api_key_header = "X-Custom-Key".to_string();
        let gate = ApiKeyGate::new(fixtures::seeded_manager(), &config.security).unwrap();
        assert_eq!(gate.header_name().as_str(), "x-custom-key");
    }
}
