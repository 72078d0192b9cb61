//! Customer CRM: customers and their addresses over a JSON REST API backed by SQLite.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use migration::ensure_schema;
pub use routes::{app, common_routes, crm_routes, API_PREFIX, BODY_LIMIT_BYTES};
pub use service::{AddressService, CustomerService, RequestValidator};
pub use state::AppState;
pub use store::Store;
