//! Shared application state for all routes.

use crate::store::PartStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Backed by `PgPartStore` in the server; tests inject an in-memory store.
    pub parts: Arc<dyn PartStore>,
}

impl AppState {
    pub fn new(parts: impl PartStore + 'static) -> Self {
        AppState {
            parts: Arc::new(parts),
        }
    }
}
