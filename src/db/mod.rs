//! Database module
//!
//! This module provides read-only access to the aviation reference store:
//! - Connection pool management
//! - Row models for airports and their related tables
//! - Repositories for the airport search and API key lookup

pub mod manager;
pub mod models;
pub mod repository;

#[cfg(test)]
pub(crate) mod fixtures;

pub use manager::{DatabaseManager, DatabaseTarget};
pub use models::{AirportRecord, ApiKey, NavaidRecord};
pub use repository::{AirportRepository, ApiKeyRepository};
