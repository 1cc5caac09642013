//! The dashboard page.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use super::{status_for, unconfigured};
use crate::error::TableroError;
use crate::html;
use crate::loader::load_dashboard;
use crate::render;

use super::super::state::AppState;

/// Query parameters for the page.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub dashboard_id: Option<String>,
}

fn error_page(err: &TableroError) -> Response {
    let title = match err {
        TableroError::ConnectionUnavailable(_) => "Connection error",
        TableroError::DashboardNotFound(_) => "Dashboard not found",
        _ => "Dashboard error",
    };
    (status_for(err), Html(html::message_page(title, &err.to_string()))).into_response()
}

/// Handle GET / - welcome page, or the dashboard named by `dashboard_id`.
pub async fn page(State(state): State<Arc<AppState>>, Query(query): Query<PageQuery>) -> Response {
    let Some(loader) = state.loader.as_ref() else {
        return error_page(&unconfigured());
    };

    let dashboard_id = match query.dashboard_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => return Html(html::welcome_page()).into_response(),
    };

    match load_dashboard(loader.as_ref(), dashboard_id).await {
        Ok(dashboard) => {
            let rendered = render::render(&dashboard.layout, &dashboard.dataset);
            info!(
                dashboard_id,
                artifacts = rendered.artifacts.len(),
                errors = rendered.errors().count(),
                "rendered dashboard"
            );
            (StatusCode::OK, Html(html::page(&rendered))).into_response()
        }
        Err(e) => {
            warn!(dashboard_id, error = %e, "dashboard unavailable");
            error_page(&e)
        }
    }
}
