use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{dto::StationDto, state::AppState};

const DEFAULT_COUNT: usize = 5;

pub async fn search(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let Some(query) = params.get("q") else {
        return Err(StatusCode::BAD_REQUEST);
    };
    let count: usize = match params.get("count") {
        Some(value) => value.parse().map_err(|_| StatusCode::BAD_REQUEST)?,
        None => DEFAULT_COUNT,
    };
    let result: Vec<StationDto> = state
        .engine
        .search_stations(query, count)
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?
        .into_iter()
        .map(StationDto::from)
        .collect();
    Ok(Json(result).into_response())
}
