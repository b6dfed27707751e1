//! Request extractors.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde_json::Value;
use survey_common::AppError;

/// Raw JSON request body.
///
/// Bodies that are not JSON at all are rejected as validation errors so the
/// client sees the same 422 envelope as for schema violations.
#[derive(Debug, Clone)]
pub struct Payload(pub Value);

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<Value>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|rejection: JsonRejection| AppError::Validation(rejection.body_text()))
    }
}
