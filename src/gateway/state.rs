use std::sync::Arc;

use crate::service::OrderLifecycleService;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<OrderLifecycleService>,
}

impl AppState {
    pub fn new(service: Arc<OrderLifecycleService>) -> Self {
        Self { service }
    }
}
