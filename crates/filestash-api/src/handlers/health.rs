//! Status and statistics handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{StatsResponse, StatusResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /status
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(state.system_service.status().await.into())
}

/// GET /stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.system_service.stats().await?;
    Ok(Json(stats.into()))
}
