//! Time-limited cache over another loader.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{Dashboard, DashboardLoader};
use crate::error::TableroError;

/// Default entry lifetime.
pub const DEFAULT_TTL_SECS: u64 = 300;

/// How often [`cleanup_cache`] sweeps expired entries.
const CLEANUP_INTERVAL_SECS: u64 = 60;

struct CacheEntry {
    dashboard: Option<Dashboard>,
    fetched_at: Instant,
}

/// Wraps a loader and remembers successful fetches (including not-found)
/// for `ttl`. Errors are never cached.
pub struct CachedLoader {
    inner: Arc<dyn DashboardLoader>,
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl CachedLoader {
    pub fn new(inner: Arc<dyn DashboardLoader>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of entries currently held, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop expired entries. Returns how many were removed.
    pub async fn prune(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| now.duration_since(e.fetched_at) < self.ttl);
        before - entries.len()
    }
}

#[async_trait]
impl DashboardLoader for CachedLoader {
    async fn fetch(&self, dashboard_id: &str) -> Result<Option<Dashboard>, TableroError> {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(dashboard_id)
                && entry.fetched_at.elapsed() < self.ttl
            {
                debug!(dashboard_id, "dashboard cache hit");
                return Ok(entry.dashboard.clone());
            }
        }

        let dashboard = self.inner.fetch(dashboard_id).await?;

        {
            let mut entries = self.entries.write().await;
            entries.insert(
                dashboard_id.to_string(),
                CacheEntry {
                    dashboard: dashboard.clone(),
                    fetched_at: Instant::now(),
                },
            );
        }

        Ok(dashboard)
    }
}

/// Background task: prune `cache` once a minute, forever.
pub async fn cleanup_cache(cache: Arc<CachedLoader>) {
    let mut interval = tokio::time::interval(Duration::from_secs(CLEANUP_INTERVAL_SECS));

    loop {
        interval.tick().await;
        let removed = cache.prune().await;
        if removed > 0 {
            let remaining = cache.len().await;
            info!(
                removed,
                remaining, "cleaned up expired dashboard cache entries"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::layout::LayoutDocument;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts fetches; fails for ids starting with "err".
    struct CountingLoader {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DashboardLoader for CountingLoader {
        async fn fetch(&self, dashboard_id: &str) -> Result<Option<Dashboard>, TableroError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if dashboard_id.starts_with("err") {
                return Err(TableroError::ConnectionUnavailable("down".into()));
            }
            Ok(Some(Dashboard {
                layout: LayoutDocument::from_json(json!([{"type": "header", "text": "x"}]))
                    .unwrap(),
                dataset: Dataset::from_json(json!([{"a": 1}])).unwrap(),
            }))
        }
    }

    fn counting() -> Arc<CountingLoader> {
        Arc::new(CountingLoader {
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_second_fetch_is_cached() {
        let inner = counting();
        let cache = CachedLoader::new(inner.clone(), Duration::from_secs(60));
        cache.fetch("a").await.unwrap();
        cache.fetch("a").await.unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_reports_configured_ttl() {
        let cache = CachedLoader::new(counting(), Duration::from_secs(DEFAULT_TTL_SECS));
        assert_eq!(cache.ttl(), Duration::from_secs(300));
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let inner = counting();
        let cache = CachedLoader::new(inner.clone(), Duration::from_secs(60));
        assert!(cache.fetch("err-1").await.is_err());
        assert!(cache.fetch("err-1").await.is_err());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_entries_refetch_and_prune() {
        let inner = counting();
        let cache = CachedLoader::new(inner.clone(), Duration::ZERO);
        cache.fetch("a").await.unwrap();
        cache.fetch("a").await.unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.prune().await, 1);
        assert!(cache.is_empty().await);
    }
}
