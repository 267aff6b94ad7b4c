//! Session handlers: connect and disconnect.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};

use filestash_auth::BasicCredentials;
use filestash_core::error::AppError;

use crate::dto::response::TokenResponse;
use crate::error::ApiError;
use crate::extractors::SessionToken;
use crate::state::AppState;

/// GET /connect
///
/// Expects `Authorization: Basic base64(email:password)`.
pub async fn connect(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let credentials = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(BasicCredentials::from_header)
        .ok_or_else(AppError::unauthenticated)?;

    let token = state.session_manager.connect(&credentials).await?;
    Ok(Json(TokenResponse { token }))
}

/// GET /disconnect
pub async fn disconnect(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Result<StatusCode, ApiError> {
    state.session_manager.disconnect(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}
