//! # HTTP Server Tests
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tablero::dataset::Dataset;
use tablero::layout::LayoutDocument;
use tablero::loader::{DashboardLoader, FileLoader, MemoryLoader};
use tablero::server::{AppState, build_router};
use tower::ServiceExt;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn app_with(loader: Option<Arc<dyn DashboardLoader>>) -> Router {
    build_router(AppState::new(loader))
}

fn sample_app() -> Router {
    let loader = MemoryLoader::new().with(
        "q3",
        LayoutDocument::from_json(json!([
            {"type": "header", "text": "Q3 review"},
            {"type": "metric", "label": "Revenue", "column": "revenue"},
            {"type": "metric", "label": "Broken", "column": "missing"}
        ]))
        .unwrap(),
        Dataset::from_json(json!([{"revenue": 1000}, {"revenue": 234}])).unwrap(),
    );
    app_with(Some(Arc::new(loader)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

// ============================================================================
// PAGE ROUTE
// ============================================================================

#[tokio::test]
async fn page_without_store_is_connection_error() {
    let (status, body) = get(app_with(None), "/").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("Could not connect to the data store"));
}

#[tokio::test]
async fn page_without_id_is_welcome() {
    let (status, body) = get(sample_app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Welcome to the AI dashboard generator"));

    let (status, _) = get(sample_app(), "/?dashboard_id=").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn page_for_unknown_id_is_not_found() {
    let (status, body) = get(sample_app(), "/?dashboard_id=unknown-id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("unknown-id"));
}

#[tokio::test]
async fn page_renders_dashboard() {
    let (status, body) = get(sample_app(), "/?dashboard_id=q3").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Q3 review</title>"));
    assert!(body.contains("1,234"));
    // The broken metric is reported inline; the page still renders.
    assert!(body.contains("class=\"tb-error\""));
}

#[tokio::test]
async fn page_from_file_store() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join("ops.json"),
        json!({
            "layout": [{"type": "gauge_chart", "value_column": "load", "title": "Load"}],
            "rows": [{"load": 73}]
        })
        .to_string(),
    )
    .unwrap();

    let app = app_with(Some(Arc::new(FileLoader::new(tmp.path()))));
    let (status, body) = get(app, "/?dashboard_id=ops").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h3>Load</h3>"));
    assert!(body.contains(">73</text>"));
}

#[tokio::test]
async fn page_from_file_store_with_overlong_id_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let app = app_with(Some(Arc::new(FileLoader::new(tmp.path()))));

    let id = "x".repeat(300);
    let (status, body) = get(app, &format!("/?dashboard_id={}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains(&id));
}

// ============================================================================
// JSON API
// ============================================================================

#[tokio::test]
async fn api_dashboard_as_json() {
    let (status, body) = get(sample_app(), "/api/dashboards/q3").await;
    assert_eq!(status, StatusCode::OK);

    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["artifacts"][1]["value"], "1,234");
    assert_eq!(value["artifacts"][2]["kind"], "error");
    assert_eq!(value["artifacts"][2]["index"], 2);
}

#[tokio::test]
async fn api_dashboard_errors_are_json() {
    let (status, body) = get(sample_app(), "/api/dashboards/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(value["error"].as_str().unwrap().contains("nope"));

    let (status, _) = get(app_with(None), "/api/dashboards/q3").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn api_render_inline_document() {
    let request = json!({
        "layout": [
            {"type": "special_effect", "effect": "balloons"},
            {"type": "future_widget"},
            {"type": "metric", "label": "Total", "column": "n"}
        ],
        "rows": [{"n": 2}, {"n": 3}]
    });

    let (status, body) = post_json(sample_app(), "/api/render", request.clone()).await;
    assert_eq!(status, StatusCode::OK);
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["effects"], json!([{"effect": "balloons"}]));
    assert_eq!(
        value["artifacts"],
        json!([{"kind": "metric", "label": "Total", "value": "5", "raw": 5.0}])
    );

    let (status, body) = post_json(sample_app(), "/api/render/html", request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("tb-balloon"));
}

#[tokio::test]
async fn api_render_rejects_non_array_layout() {
    let (status, _) = post_json(
        sample_app(),
        "/api/render",
        json!({"layout": {"type": "header"}, "rows": []}),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn api_element_types() {
    let (status, body) = get(app_with(None), "/api/element-types").await;
    assert_eq!(status, StatusCode::OK);

    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    let types: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["type"].as_str().unwrap())
        .collect();
    assert_eq!(types.len(), 13);
    assert!(types.contains(&"gauge_chart"));
    assert_eq!(value[0]["example"]["type"], "theme_config");
}
