//! JSON request body that reports unreadable input as a validation error.

use crate::error::AppError;
use crate::service::FieldErrors;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;

/// Raw JSON body. Missing content type or malformed JSON yield the same single `_root`
/// error a non-object payload gets.
#[derive(Clone, Debug)]
pub struct Payload(pub Value);

#[async_trait]
impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Payload(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "unreadable json body");
                Err(AppError::Validation(FieldErrors::root()))
            }
        }
    }
}
