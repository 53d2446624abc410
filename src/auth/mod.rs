//! Authentication module
//!
//! This module provides:
//! - The API key gate validating a presented key against the active keys
//! - Middleware enforcing the gate on every route

pub mod gate;
pub mod middleware;

pub use gate::{ApiKeyGate, AuthRejection, Authorized};
pub use middleware::authenticate;
