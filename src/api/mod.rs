//! REST API module
//!
//! This module provides the HTTP server and the airport search endpoint,
//! wrapped in CORS, request tracing and the API key check.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use middleware::{trace_id_middleware, TraceId, TRACE_ID_HEADER};
pub use models::{AirportView, ErrorResponse};
pub use server::ApiServer;
