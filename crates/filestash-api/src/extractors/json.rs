//! JSON body extractor whose rejections use the API error body.

use axum::extract::{FromRequest, Request};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

use filestash_core::error::AppError;

use crate::error::ApiError;

/// Like [`axum::Json`], but lenient about what a body looks like.
///
/// An empty body, or one that is not a JSON object, yields `T::default()`
/// so field validation reports what is missing. Unparsable JSON becomes a
/// 400 with `{"error": "..."}`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError(AppError::validation(rejection.body_text())))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            ApiError(AppError::validation(format!(
                "Failed to parse the request body as JSON: {e}"
            )))
        })?;
        if !value.is_object() {
            return Ok(Self(T::default()));
        }

        serde_json::from_value(value)
            .map(Self)
            .map_err(|e| ApiError(AppError::validation(e.to_string())))
    }
}
