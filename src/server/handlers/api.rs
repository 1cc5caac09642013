//! JSON API handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{status_for, unconfigured};
use crate::dataset::{Dataset, Row};
use crate::html;
use crate::layout::{ElementTypeMeta, LayoutDocument, element_types};
use crate::loader::load_dashboard;
use crate::render::{self, Rendered};

use super::super::state::AppState;

/// Body of the render endpoints: a layout document plus row objects.
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub layout: LayoutDocument,
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// Error body for JSON endpoints.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// Handle GET /api/dashboards/:id - render a stored dashboard as JSON.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Rendered> {
    let result = match state.loader.as_ref() {
        Some(loader) => load_dashboard(loader.as_ref(), &id).await,
        None => Err(unconfigured()),
    };
    let dashboard = result.map_err(|e| {
        (
            status_for(&e),
            Json(ApiError {
                error: e.to_string(),
            }),
        )
    })?;
    Ok(Json(render::render(&dashboard.layout, &dashboard.dataset)))
}

/// Handle POST /api/render - render an inline document as JSON.
pub async fn render(Json(req): Json<RenderRequest>) -> Json<Rendered> {
    let data = Dataset::from_rows(req.rows);
    Json(render::render(&req.layout, &data))
}

/// Handle POST /api/render/html - render an inline document as a page.
pub async fn render_html(Json(req): Json<RenderRequest>) -> Html<String> {
    let data = Dataset::from_rows(req.rows);
    Html(html::page(&render::render(&req.layout, &data)))
}

/// Handle GET /api/element-types - list recognized element kinds.
pub async fn element_types_list() -> Json<Vec<ElementTypeMeta>> {
    Json(element_types())
}
