//! Airport Search Library
//!
//! Read-only REST API over aviation reference data (airports, runways,
//! frequencies and navaids), gated by per-caller API keys.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;

// Re-export commonly used types
pub use crate::core::{AirportService, Config};
pub use api::ApiServer;
pub use db::DatabaseManager;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for the library
pub type Result<T> = anyhow::Result<T>;
