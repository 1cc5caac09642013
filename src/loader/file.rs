//! Dashboards stored as JSON files in a directory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

use super::{Dashboard, DashboardLoader};
use crate::dataset::{Dataset, Row};
use crate::error::TableroError;
use crate::layout::LayoutDocument;

/// On-disk shape of one dashboard: `{"layout": [...], "rows": [...]}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashboardFile {
    #[serde(default)]
    pub layout: LayoutDocument,
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// Longest id that maps to a file name. Longer ids are not found.
const MAX_ID_LEN: usize = 200;

/// Reads `<dir>/<id>.json`.
#[derive(Debug, Clone)]
pub struct FileLoader {
    dir: PathBuf,
}

impl FileLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path for an id, or `None` if the id could escape the directory or
    /// cannot name a file.
    fn path_for(&self, id: &str) -> Option<PathBuf> {
        if id.is_empty() || id.len() > MAX_ID_LEN {
            return None;
        }
        if id.contains(['/', '\\', '\0']) || id.contains("..") {
            return None;
        }
        Some(self.dir.join(format!("{}.json", id)))
    }
}

#[async_trait]
impl DashboardLoader for FileLoader {
    async fn fetch(&self, dashboard_id: &str) -> Result<Option<Dashboard>, TableroError> {
        let Some(path) = self.path_for(dashboard_id) else {
            debug!(dashboard_id, "rejected dashboard id");
            return Ok(None);
        };

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::InvalidInput) => {
                debug!(dashboard_id, error = %e, "no dashboard file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let file: DashboardFile = serde_json::from_slice(&bytes).map_err(|e| {
            TableroError::Store(format!("{}: {}", path.display(), e))
        })?;
        debug!(
            dashboard_id,
            elements = file.layout.len(),
            rows = file.rows.len(),
            "loaded dashboard file"
        );

        Ok(Dashboard::non_empty(file.layout, Dataset::from_rows(file.rows)))
    }
}
