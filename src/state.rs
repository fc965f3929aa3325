//! Shared application state for all routes. The accessor is injected at startup.

use crate::store::FlavorStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FlavorStore>,
}

impl AppState {
    pub fn new(store: impl FlavorStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
