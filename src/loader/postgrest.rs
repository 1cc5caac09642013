//! Dashboards from a hosted PostgREST store.
//!
//! Two tables are read per dashboard:
//!
//! - `dashboards`: one row per id, whose `config` column holds the layout
//!   (either as a JSON array or as a JSON-encoded string).
//! - `user_data`: the dataset rows, linked by `dashboard_id`.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{Dashboard, DashboardLoader};
use crate::dataset::{Dataset, Row};
use crate::error::TableroError;
use crate::layout::LayoutDocument;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct ConfigRow {
    #[serde(default)]
    config: serde_json::Value,
}

/// Client for the `dashboards` and `user_data` tables.
#[derive(Debug, Clone)]
pub struct PostgrestLoader {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl PostgrestLoader {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, TableroError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tablero/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| TableroError::ConnectionUnavailable(format!("HTTP client error: {}", e)))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    /// GET `/rest/v1/<table>` and decode the JSON body.
    async fn select<T>(&self, table: &str, query: &[(&str, String)]) -> Result<T, TableroError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| TableroError::ConnectionUnavailable(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TableroError::Store(format!("{}: HTTP {}", table, status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TableroError::ConnectionUnavailable(format!("{}: {}", url, e)))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| TableroError::Store(format!("{}: unexpected payload: {}", table, e)))
    }
}

/// The layout column may arrive as an array or as a string holding one.
fn parse_config(config: serde_json::Value) -> Result<Option<LayoutDocument>, TableroError> {
    let value = match config {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::String(s) => serde_json::from_str(&s)
            .map_err(|e| TableroError::Store(format!("config is not valid JSON: {}", e)))?,
        other => other,
    };
    LayoutDocument::from_json(value).map(Some)
}

#[async_trait]
impl DashboardLoader for PostgrestLoader {
    async fn fetch(&self, dashboard_id: &str) -> Result<Option<Dashboard>, TableroError> {
        if dashboard_id.is_empty() {
            return Ok(None);
        }

        let configs: Vec<ConfigRow> = self
            .select(
                "dashboards",
                &[
                    ("select", "config".to_string()),
                    ("id", format!("eq.{}", dashboard_id)),
                ],
            )
            .await?;
        let config = match <[ConfigRow; 1]>::try_from(configs) {
            Ok([row]) => row.config,
            Err(rows) => {
                if rows.len() > 1 {
                    warn!(dashboard_id, count = rows.len(), "more than one dashboard row for id");
                }
                return Ok(None);
            }
        };
        let Some(layout) = parse_config(config)? else {
            return Ok(None);
        };

        let rows: Vec<Row> = self
            .select(
                "user_data",
                &[
                    ("select", "*".to_string()),
                    ("dashboard_id", format!("eq.{}", dashboard_id)),
                ],
            )
            .await?;

        debug!(
            dashboard_id,
            elements = layout.len(),
            rows = rows.len(),
            "fetched dashboard from store"
        );
        Ok(Dashboard::non_empty(layout, Dataset::from_rows(rows)))
    }
}
