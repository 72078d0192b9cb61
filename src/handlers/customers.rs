//! Customer handlers: list, create, read, update, delete.

use crate::error::AppError;
use crate::extractors::{EntityId, ListParams, Payload};
use crate::response::{created, ok};
use crate::service::CustomerService;
use crate::sql::{CustomerListParams, CustomerListQuery};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

/// GET /customers — search, address filters, sort and page window from the query string.
pub async fn list(
    State(state): State<AppState>,
    ListParams(params): ListParams<CustomerListParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = CustomerListQuery::from_params(&params);
    let page = CustomerService::list(&state.store, &query).await?;
    Ok(ok(page))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Result<impl IntoResponse, AppError> {
    let customer = CustomerService::create(&state.store, &body).await?;
    Ok(created(customer))
}

pub async fn read(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let customer = CustomerService::get(&state.store, id).await?;
    Ok(ok(customer))
}

pub async fn update(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Payload(body): Payload,
) -> Result<impl IntoResponse, AppError> {
    let customer = CustomerService::update(&state.store, id, &body).await?;
    Ok(ok(customer))
}

pub async fn delete(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    CustomerService::delete(&state.store, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
