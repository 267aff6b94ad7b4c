//! Caller extractors: read the session token header and resolve the user.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use filestash_core::error::{AppError, ErrorKind};
use filestash_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Raw session token from the configured header.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl SessionToken {
    fn from_parts(parts: &Parts, state: &AppState) -> Option<Self> {
        parts
            .headers
            .get(state.config.auth.token_header.as_str())
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| Self(token.to_string()))
    }
}

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Self::from_parts(parts, state).ok_or_else(|| AppError::unauthenticated().into())
    }
}

/// Authenticated caller. Rejects with 401 when the token is missing,
/// expired, or belongs to a deleted user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionToken(token) = SessionToken::from_request_parts(parts, state).await?;
        let user = state.session_manager.current_user(&token).await?;
        Ok(AuthUser(RequestContext::new(user.id)))
    }
}

/// Caller when a token is present and valid, anonymous otherwise.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<RequestContext>);

impl MaybeAuthUser {
    pub fn context(&self) -> Option<&RequestContext> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(SessionToken(token)) = SessionToken::from_parts(parts, state) else {
            return Ok(Self(None));
        };
        match state.session_manager.current_user(&token).await {
            Ok(user) => Ok(Self(Some(RequestContext::new(user.id)))),
            Err(e) if e.kind == ErrorKind::Unauthenticated => Ok(Self(None)),
            Err(e) => Err(e.into()),
        }
    }
}
