//! Router assembly: everything is served under `/api`.

mod common;
mod crm;

pub use common::common_routes;
pub use crm::crm_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/api";
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Full application router with request tracing, permissive CORS for the browser client,
/// and a request body cap.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(common_routes(state.clone()))
        .merge(crm_routes(state));
    Router::new()
        .nest(API_PREFIX, api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
                .layer(CorsLayer::permissive()),
        )
}
