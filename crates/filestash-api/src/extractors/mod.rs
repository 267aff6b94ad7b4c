//! Custom Axum extractors.

pub mod auth;
pub mod json;

pub use auth::{AuthUser, MaybeAuthUser, SessionToken};
pub use json::JsonBody;
