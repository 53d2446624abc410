//! Core application layer
//!
//! This module provides:
//! - Configuration management
//! - Structured logging
//! - Error handling and response formatting
//! - The airport lookup service

pub mod config;
pub mod error;
pub mod logging;
pub mod services;

pub use config::Config;
pub use error::{AppError, ErrorResponse, Result};
pub use logging::Logger;
pub use services::AirportService;
