//! Customer and address routes.

use crate::handlers::{addresses, customers};
use crate::state::AppState;
use axum::{routing::get, routing::put, Router};

pub fn crm_routes(state: AppState) -> Router {
    Router::new()
        .route("/customers", get(customers::list).post(customers::create))
        .route(
            "/customers/:id",
            get(customers::read)
                .put(customers::update)
                .delete(customers::delete),
        )
        .route(
            "/customers/:id/addresses",
            get(addresses::list).post(addresses::create),
        )
        .route(
            "/addresses/:address_id",
            put(addresses::update).delete(addresses::delete),
        )
        .with_state(state)
}
