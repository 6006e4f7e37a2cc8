//! Custom Axum extractors

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;

use super::error::ApiError;

/// JSON body extractor whose rejections render as [`ApiError::Validation`].
///
/// Status codes are axum's own: 422 for a missing field or wrong type, 400
/// for malformed JSON, 415 for a missing `application/json` content type.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        Ok(Self(value))
    }
}
