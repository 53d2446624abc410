use super::AppState;
use crate::api::middleware::TraceId;
use crate::api::models::AirportView;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Extension, Json,
};

/// Handler for GET /airportByName/:name - Search airports by name or ident
pub async fn get_airports_by_name(
    State(state): State<AppState>,
    trace_id: Option<Extension<TraceId>>,
    Path(name): Path<String>,
) -> Response {
    match state.airport_service.find_by_name_or_ident(&name).await {
        Ok(airports) => {
            let views: Vec<AirportView> = airports.into_iter().map(Into::into).collect();
            Json(views).into_response()
        }
        Err(e) => match trace_id {
            Some(Extension(trace_id)) => e.into_response_with_trace_id(trace_id.to_string()),
            None => e.into_response(),
        },
    }
}
