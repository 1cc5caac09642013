//! # Rendering Tests
//!
//! End-to-end behaviour of the layout → dataset → rendered dashboard
//! pipeline, through the public API only.

use pretty_assertions::assert_eq;
use serde_json::json;
use tablero::dataset::Dataset;
use tablero::html;
use tablero::layout::{LayoutDocument, ThemeConfig};
use tablero::loader::{DashboardLoader, MemoryLoader, load_dashboard};
use tablero::render::{self, Artifact, Figure};
use tablero::theme;
use tablero::TableroError;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn doc(value: serde_json::Value) -> LayoutDocument {
    LayoutDocument::from_json(value).expect("layout must be an array")
}

fn data(value: serde_json::Value) -> Dataset {
    Dataset::from_json(value).expect("dataset must be an array of objects")
}

fn sales() -> Dataset {
    data(json!([
        {"month": "Jan", "region": "North", "sales": 10, "order_date": "2024-01-05"},
        {"month": "Feb", "region": "South", "sales": 20, "order_date": "2024-02-05"},
        {"month": "Mar", "region": "North", "sales": 30, "order_date": "not a date"}
    ]))
}

// ============================================================================
// CORE PROPERTIES
// ============================================================================

#[test]
fn rendering_twice_gives_identical_output() {
    let layout = doc(json!([
        {"type": "theme_config", "config": {"primaryColor": "#FF4B4B"}},
        {"type": "special_effect", "effect": "snow"},
        {"type": "header", "text": "Sales"},
        {"type": "metric", "label": "Total", "column": "sales"},
        {"type": "line_chart", "x": "order_date", "y": "sales"},
        {"type": "donut_chart", "label_column": "region", "value_column": "sales"},
        {"type": "table"}
    ]));
    let dataset = sales();

    let first = render::render(&layout, &dataset);
    let second = render::render(&layout, &dataset);
    assert_eq!(first, second);
    assert_eq!(html::page(&first), html::page(&second));
}

#[test]
fn unknown_types_render_like_they_were_removed() {
    let with_unknown = doc(json!([
        {"type": "header", "text": "Sales"},
        {"type": "sparkline", "column": "sales"},
        {"type": "metric", "label": "Total", "column": "sales"},
        {"type": "Header", "text": "case matters"}
    ]));
    let without = doc(json!([
        {"type": "header", "text": "Sales"},
        {"type": "metric", "label": "Total", "column": "sales"}
    ]));

    assert_eq!(with_unknown.skipped().len(), 2);
    assert_eq!(
        render::render(&with_unknown, &sales()),
        render::render(&without, &sales())
    );
}

#[test]
fn theme_applies_before_elements_that_precede_it() {
    let layout = doc(json!([
        {"type": "bar_chart", "x": "month", "y": "sales"},
        {"type": "theme_config", "config": {"primaryColor": "#FF4B4B", "backgroundColor": "#0E1117"}},
        {"type": "header", "text": "After"}
    ]));
    let rendered = render::render(&layout, &sales());

    let directives = rendered.theme.as_ref().expect("theme resolved");
    assert_eq!(directives.primary_color, "#FF4B4B");
    assert_eq!(rendered.artifacts.len(), 2);

    let page = html::page(&rendered);
    let style = page.find("background-color: #0E1117").expect("theme stylesheet");
    let chart = page.find("<svg").expect("bar chart");
    let header = page.find("tb-header\">After").expect("header");
    assert!(style < chart && style < header);
    // The chart drawn first already uses the theme's primary colour.
    assert!(page[chart..header].contains("fill=\"#FF4B4B\""));
}

#[test]
fn last_theme_config_wins() {
    let layout = doc(json!([
        {"type": "theme_config", "config": {"textColor": "#111111"}},
        {"type": "header", "text": "x"},
        {"type": "theme_config", "config": {"textColor": "#222222"}}
    ]));
    let rendered = render::render(&layout, &sales());
    assert_eq!(rendered.theme.unwrap().text_color, "#222222");
}

#[test]
fn empty_theme_config_resolves_to_defaults() {
    let d = theme::resolve(&ThemeConfig::default());
    assert_eq!(d.background_color, "#FFFFFF");
    assert_eq!(d.text_color, "#000000");
    assert_eq!(d.primary_color, "#CCCCCC");
    assert_eq!(d.font_family, "sans-serif");
    assert_eq!(d.header_size, "28px");
    assert_eq!(d.body_size, "16px");

    // Same through the document path, with junk values falling back.
    let rendered = render::render(
        &doc(json!([{"type": "theme_config", "config": {"textColor": 7, "typography": "big"}}])),
        &sales(),
    );
    assert_eq!(rendered.theme.unwrap(), d);
}

#[test]
fn metric_sums_and_groups_thousands() {
    let layout = doc(json!([{"type": "metric", "label": "Sales", "column": "sales"}]));

    let small = render::render(&layout, &sales());
    assert!(matches!(
        &small.artifacts[0],
        Artifact::Metric { value, .. } if value == "60"
    ));

    let big = render::render(&layout, &data(json!([{"sales": 1000}, {"sales": 234}])));
    assert!(matches!(
        &big.artifacts[0],
        Artifact::Metric { value, .. } if value == "1,234"
    ));
}

#[test]
fn gauge_uses_first_row_only() {
    let layout = doc(json!([{"type": "gauge_chart", "value_column": "v"}]));
    let rendered = render::render(&layout, &data(json!([{"v": 42}, {"v": 99}])));

    let Artifact::Chart(chart) = &rendered.artifacts[0] else {
        panic!("expected a chart, got {:?}", rendered.artifacts[0]);
    };
    assert_eq!(
        chart.figure,
        Figure::Gauge {
            value: 42.0,
            min: 0.0,
            max: 100.0
        }
    );
    assert!(html::page(&rendered).contains(">42</text>"));
}

#[test]
fn donut_always_has_a_hole() {
    let layout = doc(json!([
        {"type": "donut_chart", "label_column": "region", "value_column": "sales", "hole": 0}
    ]));
    let rendered = render::render(&layout, &sales());

    let Artifact::Chart(chart) = &rendered.artifacts[0] else {
        panic!("expected a chart");
    };
    let Figure::Donut { hole, slices } = &chart.figure else {
        panic!("expected a donut");
    };
    assert_eq!(*hole, 0.5);
    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].label, "North");
    assert_eq!(slices[0].value, 40.0);
}

#[tokio::test]
async fn unknown_dashboard_reports_the_id() {
    let loader = MemoryLoader::new().with(
        "known",
        doc(json!([{"type": "header", "text": "x"}])),
        sales(),
    );

    assert!(loader.fetch("unknown-id").await.unwrap().is_none());

    let err = load_dashboard(&loader, "unknown-id").await.unwrap_err();
    assert!(matches!(err, TableroError::DashboardNotFound(_)));
    let page = html::message_page("Dashboard not found", &err.to_string());
    assert!(page.contains("unknown-id"));
}

// ============================================================================
// ISOLATION AND COERCION
// ============================================================================

#[test]
fn failing_element_does_not_stop_the_rest() {
    let layout = doc(json!([
        {"type": "header", "text": "Before"},
        {"type": "bar_chart", "x": "month", "y": "revenue"},
        {"type": "metric", "label": "Region", "column": "region"},
        {"type": "gauge_chart", "value_column": "sales", "min_value": 10, "max_value": 10},
        {"type": "header", "text": "After"}
    ]));
    let rendered = render::render(&layout, &sales());

    let kinds: Vec<(bool, Option<usize>)> = rendered
        .artifacts
        .iter()
        .map(|a| match a {
            Artifact::Error { index, .. } => (true, Some(*index)),
            _ => (false, None),
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            (false, None),
            (true, Some(1)),
            (true, Some(2)),
            (true, Some(3)),
            (false, None)
        ]
    );
    assert_eq!(
        rendered.artifacts[4],
        Artifact::Header {
            text: "After".into()
        }
    );

    let page = html::page(&rendered);
    assert_eq!(page.matches("class=\"tb-error\"").count(), 3);
    assert!(page.contains("revenue"));
}

#[test]
fn unparseable_dates_become_missing() {
    let dataset = sales();
    let column = dataset.column("order_date").unwrap();
    assert_eq!(column.values()[0].kind(), "timestamp");
    assert!(column.values()[2].is_null());
    // Non-temporal names are left alone.
    assert_eq!(dataset.column("month").unwrap().values()[0].kind(), "text");
}

#[test]
fn multi_series_chart_draws_every_column() {
    let layout = doc(json!([
        {"type": "area_chart", "x": "month", "y": ["sales", "cost"], "title": "Sales vs cost"}
    ]));
    let dataset = data(json!([
        {"month": "Jan", "sales": 10, "cost": 4},
        {"month": "Feb", "sales": 20, "cost": null}
    ]));
    let rendered = render::render(&layout, &dataset);

    let Artifact::Chart(chart) = &rendered.artifacts[0] else {
        panic!("expected a chart");
    };
    assert_eq!(chart.title.as_deref(), Some("Sales vs cost"));
    let Figure::Cartesian { series, .. } = &chart.figure else {
        panic!("expected a cartesian chart");
    };
    let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["sales", "cost"]);
    assert_eq!(series[1].values, vec![Some(4.0), None]);
}

#[test]
fn rendered_serializes_as_tagged_json() {
    let layout = doc(json!([
        {"type": "header", "text": "H"},
        {"type": "radar_chart", "categories": ["a", "b"], "name_column": "n"}
    ]));
    let dataset = data(json!([{"n": "row1", "a": 1, "b": 2}]));
    let value = serde_json::to_value(render::render(&layout, &dataset)).unwrap();

    assert_eq!(value["artifacts"][0], json!({"kind": "header", "text": "H"}));
    assert_eq!(value["artifacts"][1]["figure"]["kind"], "radar");
    assert_eq!(
        value["artifacts"][1]["figure"]["polygons"][0]["theta"],
        json!(["a", "b", "a"])
    );
    assert_eq!(value["theme"], serde_json::Value::Null);
}
