//! API routes

use crate::api::handlers::{get_airports_by_name, AppState};
use crate::auth::middleware::authenticate;
use crate::core::error::AppError;
use axum::{middleware, response::IntoResponse, routing::get, Router};

/// Build the API routes
///
/// The API key check wraps every route, the fallback included, so nothing
/// is answered for a caller without an active key.
pub fn build_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/airportByName/:name", get(get_airports_by_name))
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .with_state(state)
}

async fn route_not_found() -> impl IntoResponse {
    AppError::NotFound("Route not found".to_string())
}
