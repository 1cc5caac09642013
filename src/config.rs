//! Environment-driven settings and logging setup.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `TABLERO_BIND` | listen address | `127.0.0.1:8080` |
//! | `TABLERO_DATA_DIR` | directory of `<id>.json` dashboards | unset |
//! | `SUPABASE_URL` / `SUPABASE_KEY` | hosted store | unset |
//! | `TABLERO_CACHE_TTL_SECS` | loader cache lifetime, `0` disables | `300` |
//! | `TABLERO_LOG_JSON` | JSON log lines | `false` |
//!
//! The hosted store wins when both it and a data directory are configured.
//! With neither, the server runs but every dashboard request reports a
//! connection error.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::TableroError;
use crate::loader::{DEFAULT_TTL_SECS, DashboardLoader, FileLoader, PostgrestLoader};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Credentials for the hosted store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub url: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind: String,
    pub data_dir: Option<PathBuf>,
    pub store: Option<StoreSettings>,
    pub cache_ttl: Duration,
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            data_dir: None,
            store: None,
            cache_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            log_json: false,
        }
    }
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn parse_u64(value: Option<String>, default: u64) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read settings through `lookup`, which returns a variable's value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let store = match (
            non_empty(lookup("SUPABASE_URL")),
            non_empty(lookup("SUPABASE_KEY")),
        ) {
            (Some(url), Some(key)) => Some(StoreSettings { url, key }),
            _ => None,
        };

        Self {
            bind: non_empty(lookup("TABLERO_BIND")).unwrap_or_else(|| DEFAULT_BIND.to_string()),
            data_dir: non_empty(lookup("TABLERO_DATA_DIR")).map(PathBuf::from),
            store,
            cache_ttl: Duration::from_secs(parse_u64(
                lookup("TABLERO_CACHE_TTL_SECS"),
                DEFAULT_TTL_SECS,
            )),
            log_json: parse_bool(lookup("TABLERO_LOG_JSON"), false),
        }
    }

    /// The configured dashboard source, uncached. `None` when nothing is
    /// configured.
    pub fn loader(&self) -> Result<Option<Arc<dyn DashboardLoader>>, TableroError> {
        if let Some(store) = &self.store {
            let loader = PostgrestLoader::new(&store.url, &store.key)?;
            return Ok(Some(Arc::new(loader)));
        }
        Ok(self
            .data_dir
            .as_ref()
            .map(|dir| Arc::new(FileLoader::new(dir)) as Arc<dyn DashboardLoader>))
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter.
pub fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tablero=info,tower_http=info"));
    let registry = tracing_subscriber::registry().with(filter);
    if log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
