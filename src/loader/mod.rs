//! # Dashboard Loaders
//!
//! A loader resolves a dashboard identifier to its layout document and
//! dataset. `Ok(None)` means there is nothing to show: the id is unknown or
//! empty, or the layout or dataset is missing or empty. Errors are reserved
//! for a store that cannot be reached or answers with something unusable.
//!
//! | Loader | Source |
//! |--------|--------|
//! | [`MemoryLoader`] | In-process map |
//! | [`FileLoader`] | `<dir>/<id>.json` files |
//! | [`PostgrestLoader`] | Hosted PostgREST store |
//! | [`CachedLoader`] | TTL cache over any of the above |

mod cache;
mod file;
mod postgrest;

pub use cache::{CachedLoader, DEFAULT_TTL_SECS, cleanup_cache};
pub use file::{DashboardFile, FileLoader};
pub use postgrest::PostgrestLoader;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::TableroError;
use crate::layout::LayoutDocument;

/// A layout document paired with the dataset it renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub layout: LayoutDocument,
    pub dataset: Dataset,
}

impl Dashboard {
    /// `None` when either half is empty; such a dashboard is not shown.
    pub fn non_empty(layout: LayoutDocument, dataset: Dataset) -> Option<Self> {
        if layout.is_empty() || dataset.is_empty() {
            None
        } else {
            Some(Self { layout, dataset })
        }
    }
}

/// Source of dashboards.
#[async_trait]
pub trait DashboardLoader: Send + Sync {
    /// Fetch one dashboard. `Ok(None)` is the not-found outcome.
    async fn fetch(&self, dashboard_id: &str) -> Result<Option<Dashboard>, TableroError>;
}

#[async_trait]
impl<L: DashboardLoader + ?Sized> DashboardLoader for Arc<L> {
    async fn fetch(&self, dashboard_id: &str) -> Result<Option<Dashboard>, TableroError> {
        (**self).fetch(dashboard_id).await
    }
}

/// Fetch a dashboard, turning the not-found outcome into an error that
/// names the id.
pub async fn load_dashboard<L>(loader: &L, dashboard_id: &str) -> Result<Dashboard, TableroError>
where
    L: DashboardLoader + ?Sized,
{
    if dashboard_id.is_empty() {
        return Err(TableroError::DashboardNotFound(String::new()));
    }
    match loader.fetch(dashboard_id).await? {
        Some(dashboard) => Ok(dashboard),
        None => {
            debug!(dashboard_id, "dashboard not found");
            Err(TableroError::DashboardNotFound(dashboard_id.to_string()))
        }
    }
}

/// In-process dashboards keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    dashboards: HashMap<String, Dashboard>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dashboard, replacing any previous one with the same id.
    pub fn insert(&mut self, id: impl Into<String>, layout: LayoutDocument, dataset: Dataset) {
        self.dashboards
            .insert(id.into(), Dashboard { layout, dataset });
    }

    /// Builder form of [`MemoryLoader::insert`].
    pub fn with(mut self, id: impl Into<String>, layout: LayoutDocument, dataset: Dataset) -> Self {
        self.insert(id, layout, dataset);
        self
    }
}

#[async_trait]
impl DashboardLoader for MemoryLoader {
    async fn fetch(&self, dashboard_id: &str) -> Result<Option<Dashboard>, TableroError> {
        Ok(self
            .dashboards
            .get(dashboard_id)
            .and_then(|d| Dashboard::non_empty(d.layout.clone(), d.dataset.clone())))
    }
}
