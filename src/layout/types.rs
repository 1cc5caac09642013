//! Element struct types for the layout document.
//!
//! All types derive `Serialize + Deserialize` so the same types work for
//! Rust construction and for parsing stored layout documents. Field names
//! are the wire names, exactly as the upstream generator writes them.
//!
//! Each element implements [`ElementMeta`] to provide a starter example.
//! The HTTP API lists these so document authors can see every shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Metadata that every element struct must provide.
pub trait ElementMeta: Sized {
    /// Example value with realistic parameters.
    ///
    /// Distinct from `Default`: examples reference plausible columns so a
    /// listed element is immediately useful as a template.
    fn example() -> Self;
}

/// Accept a string, treat anything else as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Accept a well-formed object, fall back to the default for anything else.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

// ============================================================================
// GLOBAL ELEMENTS
// ============================================================================

/// Theme configuration as written in the layout document.
///
/// Every field is optional. Absent or non-string values fall back to the
/// defaults applied by [`crate::theme::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub typography: Typography,
}

/// Font settings inside a [`ThemeConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub header_size: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub body_size: Option<String>,
}

/// `theme_config` element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeSettings {
    #[serde(default, deserialize_with = "lenient_object")]
    pub config: ThemeConfig,
}

impl ElementMeta for ThemeSettings {
    fn example() -> Self {
        Self {
            config: ThemeConfig {
                background_color: Some("#0F172A".into()),
                text_color: Some("#E2E8F0".into()),
                primary_color: Some("#38BDF8".into()),
                typography: Typography {
                    font_family: Some("Inter, sans-serif".into()),
                    header_size: Some("32px".into()),
                    body_size: Some("16px".into()),
                },
            },
        }
    }
}

/// Named full-page effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Snow,
    Balloons,
    /// Inject the element's `payload` as a raw stylesheet.
    CustomCss,
}

/// `special_effect` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialEffect {
    pub effect: EffectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl ElementMeta for SpecialEffect {
    fn example() -> Self {
        Self {
            effect: EffectKind::Balloons,
            payload: None,
        }
    }
}

// ============================================================================
// TEXT ELEMENTS
// ============================================================================

/// `header` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub text: String,
}

impl ElementMeta for Header {
    fn example() -> Self {
        Self {
            text: "Quarterly Sales".into(),
        }
    }
}

/// `markdown` element. Raw HTML in the text is escaped when rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Markdown {
    pub text: String,
}

impl ElementMeta for Markdown {
    fn example() -> Self {
        Self {
            text: "Revenue grew **12%** over the previous quarter.".into(),
        }
    }
}

/// `metric` element: the sum of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub column: String,
}

impl ElementMeta for Metric {
    fn example() -> Self {
        Self {
            label: "Total sales".into(),
            column: "sales".into(),
        }
    }
}

// ============================================================================
// CHART ELEMENTS
// ============================================================================

/// One or several y columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesSpec {
    One(String),
    Many(Vec<String>),
}

impl SeriesSpec {
    pub fn columns(&self) -> Vec<&str> {
        match self {
            SeriesSpec::One(c) => vec![c.as_str()],
            SeriesSpec::Many(cs) => cs.iter().map(String::as_str).collect(),
        }
    }
}

/// Shared parameters of `bar_chart`, `line_chart` and `area_chart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XyChart {
    pub x: String,
    pub y: SeriesSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ElementMeta for XyChart {
    fn example() -> Self {
        Self {
            x: "order_date".into(),
            y: SeriesSpec::One("sales".into()),
            title: Some("Sales over time".into()),
        }
    }
}

/// `donut_chart` element. The hole is fixed; there is no parameter for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutChart {
    pub label_column: String,
    pub value_column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ElementMeta for DonutChart {
    fn example() -> Self {
        Self {
            label_column: "region".into(),
            value_column: "sales".into(),
            title: Some("Sales by region".into()),
        }
    }
}

/// `funnel_chart` element. Both fields name dataset columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelChart {
    /// Column holding each stage's magnitude.
    pub x_values: String,
    /// Column holding the stage labels.
    pub y_stages: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ElementMeta for FunnelChart {
    fn example() -> Self {
        Self {
            x_values: "count".into(),
            y_stages: "stage".into(),
            title: Some("Conversion".into()),
        }
    }
}

/// `gauge_chart` element: first-row snapshot of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeChart {
    pub value_column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

impl ElementMeta for GaugeChart {
    fn example() -> Self {
        Self {
            value_column: "satisfaction".into(),
            title: Some("Customer satisfaction".into()),
            min_value: Some(0.0),
            max_value: Some(100.0),
        }
    }
}

/// `radar_chart` element: one polygon per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarChart {
    /// Columns used as the polygon's axes, in order.
    pub categories: Vec<String>,
    /// Column labelling each row's polygon.
    pub name_column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ElementMeta for RadarChart {
    fn example() -> Self {
        Self {
            categories: vec!["speed".into(), "quality".into(), "price".into()],
            name_column: "vendor".into(),
            title: Some("Vendor comparison".into()),
        }
    }
}

/// `table` element: the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Table {
    pub const DEFAULT_TITLE: &'static str = "Detailed data";
}

impl ElementMeta for Table {
    fn example() -> Self {
        Self::default()
    }
}
