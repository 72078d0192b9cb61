//! Query string for list endpoints. Never rejects: repeated keys keep the last value.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Clone, Debug)]
pub struct ListParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ListParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pairs = match Query::<Vec<(String, String)>>::from_request_parts(parts, state).await {
            Ok(Query(pairs)) => pairs,
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "unreadable query string");
                Vec::new()
            }
        };
        let mut fields = Map::new();
        for (key, value) in pairs {
            fields.insert(key, Value::String(value));
        }
        serde_json::from_value(Value::Object(fields))
            .map(ListParams)
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}
