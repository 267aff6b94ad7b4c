//! Request context carrying the authenticated caller.

use serde::{Deserialize, Serialize};

use filestash_core::error::AppError;
use filestash_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by the API layer from a resolved session token and passed into
/// service methods so that every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
}

impl RequestContext {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Unwrap an optional caller, failing with `Unauthenticated`.
    pub fn require(ctx: Option<&RequestContext>) -> Result<&RequestContext, AppError> {
        ctx.ok_or_else(AppError::unauthenticated)
    }
}
