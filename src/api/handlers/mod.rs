pub mod airports;

pub use airports::*;

use crate::auth::ApiKeyGate;
use crate::core::services::AirportService;
use std::sync::Arc;

/// Shared application state for handlers and the auth middleware
#[derive(Clone)]
pub struct AppState {
    pub airport_service: Arc<AirportService>,
    pub gate: Arc<ApiKeyGate>,
}
