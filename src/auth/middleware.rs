//! Authentication middleware

use crate::api::handlers::AppState;
use crate::api::middleware::TraceId;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Reject the request unless it carries an active API key
///
/// Runs ahead of every handler. On rejection the handler never executes and
/// a 401 is returned; the presented key itself is never logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let trace_id = request
        .extensions()
        .get::<TraceId>()
        .map(|t| t.as_str().to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let presented = request
        .headers()
        .get(state.gate.header_name())
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    match state.gate.authorize(presented.as_deref()).await {
        Ok(authorized) => {
            tracing::debug!(key_id = authorized.key_id, "API key accepted");
            request.extensions_mut().insert(authorized);
            next.run(request).await
        }
        Err(e) => {
            if e.status_code().is_client_error() {
                tracing::warn!(reason = %e, path = %request.uri().path(), "API key rejected");
            }
            e.into_response_with_trace_id(trace_id)
        }
    }
}
