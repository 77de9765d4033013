use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::state::AppState;

/// `GET /route?from=..&to=..`
///
/// Unresolved places and missing paths are part of the returned route, they
/// are not HTTP errors.
pub async fn route(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let from = params
        .get("from")
        .filter(|value| !value.trim().is_empty())
        .ok_or(StatusCode::BAD_REQUEST)?
        .clone();
    let to = params
        .get("to")
        .filter(|value| !value.trim().is_empty())
        .ok_or(StatusCode::BAD_REQUEST)?
        .clone();

    // The search is CPU bound, keep it off the async workers.
    let route = tokio::task::spawn_blocking(move || state.engine.find_route(&from, &to))
        .await
        .map_err(|err| {
            error!("Route search panicked: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|err| {
            error!("Route search failed: {err}");
            StatusCode::SERVICE_UNAVAILABLE
        })?;
    Ok(Json(route).into_response())
}
