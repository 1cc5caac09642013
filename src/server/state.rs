//! Server state.

use std::sync::Arc;

use crate::loader::DashboardLoader;

/// Application state shared across handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// Dashboard source. `None` when no store is configured; dashboard
    /// requests then report a connection error.
    pub loader: Option<Arc<dyn DashboardLoader>>,
}

impl AppState {
    pub fn new(loader: Option<Arc<dyn DashboardLoader>>) -> Self {
        Self { loader }
    }
}
