use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{dto::HealthDto, state::AppState};

pub async fn health(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let stats = state
        .engine
        .stats()
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;
    Ok(Json(HealthDto::from(stats)).into_response())
}
