//! # HTTP Server for Dashboards
//!
//! Serves rendered dashboards as HTML pages and exposes the renderer as a
//! small JSON API.
//!
//! ## Usage
//!
//! ```bash
//! TABLERO_DATA_DIR=./dashboards tablero serve --listen 0.0.0.0:8080
//! ```
//!
//! Then open http://localhost:8080/?dashboard_id=<id> in a browser.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /?dashboard_id=<id>` | Rendered page, welcome page, or error page |
//! | `GET /api/dashboards/:id` | Rendered dashboard as JSON |
//! | `POST /api/render` | Inline `{"layout", "rows"}` rendered as JSON |
//! | `POST /api/render/html` | Same body rendered as a page |
//! | `GET /api/element-types` | Recognized element kinds with examples |

mod handlers;
mod state;

pub use handlers::api::{ApiError, RenderRequest};
pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Settings;
use crate::error::TableroError;
use crate::loader::{CachedLoader, DashboardLoader, cleanup_cache};

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(handlers::dashboard::page))
        // JSON API
        .route("/api/dashboards/:id", get(handlers::api::dashboard))
        .route("/api/render", post(handlers::api::render))
        .route("/api/render/html", post(handlers::api::render_html))
        .route("/api/element-types", get(handlers::api::element_types_list))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use tablero::{config::Settings, server::serve};
///
/// # async fn example() -> Result<(), tablero::TableroError> {
/// let settings = Settings::from_env();
/// serve(&settings).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(settings: &Settings) -> Result<(), TableroError> {
    let loader = match settings.loader()? {
        Some(base) if !settings.cache_ttl.is_zero() => {
            let cache = Arc::new(CachedLoader::new(base, settings.cache_ttl));
            info!(ttl_secs = cache.ttl().as_secs(), "dashboard cache enabled");
            // Background cache cleanup
            tokio::spawn(cleanup_cache(cache.clone()));
            Some(cache as Arc<dyn DashboardLoader>)
        }
        other => other,
    };

    if loader.is_none() {
        warn!("no data store configured; set SUPABASE_URL/SUPABASE_KEY or TABLERO_DATA_DIR");
    }

    let app = build_router(AppState::new(loader));

    let listener = tokio::net::TcpListener::bind(&settings.bind).await?;
    info!(
        listen = %settings.bind,
        store = ?settings.store.as_ref().map(|s| s.url.as_str()),
        data_dir = ?settings.data_dir,
        cache_ttl_secs = settings.cache_ttl.as_secs(),
        "tablero HTTP server listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
