//! Shared application state for all routes.

use crate::store::Store;

#[derive(Clone, Debug)]
pub struct AppState {
    /// Opened once at start-up and shared by every request.
    pub store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        AppState { store }
    }
}
