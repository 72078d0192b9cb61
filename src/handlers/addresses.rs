//! Address handlers. Listing and creation are nested under a customer; update and delete
//! address the row directly.

use crate::error::AppError;
use crate::extractors::{EntityId, ListParams, Payload};
use crate::response::{created, ok};
use crate::service::AddressService;
use crate::sql::AddressFilter;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

/// GET /customers/:id/addresses — optional `city`, `state`, `pin_code` substring filters.
pub async fn list(
    State(state): State<AppState>,
    EntityId(customer_id): EntityId,
    ListParams(filter): ListParams<AddressFilter>,
) -> Result<impl IntoResponse, AppError> {
    let rows = AddressService::list(&state.store, customer_id, &filter).await?;
    Ok(ok(rows))
}

pub async fn create(
    State(state): State<AppState>,
    EntityId(customer_id): EntityId,
    Payload(body): Payload,
) -> Result<impl IntoResponse, AppError> {
    let address = AddressService::create(&state.store, customer_id, &body).await?;
    Ok(created(address))
}

pub async fn update(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Payload(body): Payload,
) -> Result<impl IntoResponse, AppError> {
    let address = AddressService::update(&state.store, id, &body).await?;
    Ok(ok(address))
}

pub async fn delete(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    AddressService::delete(&state.store, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
