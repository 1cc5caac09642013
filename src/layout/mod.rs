//! # Layout Document Model
//!
//! A layout document is a JSON array of elements, each selecting its kind
//! through a `"type"` field:
//!
//! ```
//! use tablero::layout::{Element, LayoutDocument};
//!
//! let doc: LayoutDocument = serde_json::from_str(r#"[
//!     {"type": "header", "text": "Sales"},
//!     {"type": "sparkline", "column": "sales"},
//!     {"type": "metric", "label": "Total", "column": "sales"}
//! ]"#).unwrap();
//!
//! // The unknown `sparkline` element is skipped, not an error.
//! assert_eq!(doc.len(), 2);
//! assert_eq!(doc.skipped().len(), 1);
//! assert!(matches!(doc.elements().next(), Some(Element::Header(_))));
//! ```
//!
//! Parsing is tolerant element by element. Unknown kinds and malformed
//! elements are recorded in [`LayoutDocument::skipped`] and never reach the
//! renderers, so a document written for a newer renderer still renders.

pub mod types;

pub use types::*;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TableroError;

/// Define the Element enum and its dispatch helpers from a single list.
///
/// Adding an element kind: add one line here, then define the struct in
/// `types.rs` with `impl ElementMeta`. The exhaustive matches in the
/// renderer will point at what is left.
macro_rules! define_elements {
    ($($variant:ident($inner:ty) = $tag:literal, $label:literal;)+) => {
        /// One entry of a layout document.
        ///
        /// Serialized with an internal `"type"` tag, e.g.
        /// `{"type": "header", "text": "Hello"}`.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "type")]
        pub enum Element {
            $(#[serde(rename = $tag)] $variant($inner),)+
        }

        /// Every recognized `"type"` value.
        pub const ELEMENT_TYPES: &[&str] = &[$($tag),+];

        impl Element {
            /// The wire `"type"` of this element.
            pub fn type_name(&self) -> &'static str {
                match self { $(Element::$variant(_) => $tag,)+ }
            }

            /// Human-readable display label.
            pub fn label(&self) -> &'static str {
                match self { $(Element::$variant(_) => $label,)+ }
            }

            /// One example of every element kind (from [`ElementMeta::example`]).
            pub fn all_examples() -> Vec<Self> {
                vec![$(Element::$variant(<$inner>::example()),)+]
            }
        }
    };
}

define_elements! {
    ThemeConfig(ThemeSettings) = "theme_config", "Theme";
    SpecialEffect(SpecialEffect) = "special_effect", "Special effect";
    Header(Header) = "header", "Header";
    Markdown(Markdown) = "markdown", "Markdown";
    Metric(Metric) = "metric", "Metric";
    BarChart(XyChart) = "bar_chart", "Bar chart";
    LineChart(XyChart) = "line_chart", "Line chart";
    AreaChart(XyChart) = "area_chart", "Area chart";
    DonutChart(DonutChart) = "donut_chart", "Donut chart";
    FunnelChart(FunnelChart) = "funnel_chart", "Funnel chart";
    GaugeChart(GaugeChart) = "gauge_chart", "Gauge";
    RadarChart(RadarChart) = "radar_chart", "Radar chart";
    Table(Table) = "table", "Table";
}

impl Element {
    /// Global elements configure the page rather than add content to it.
    pub fn is_global(&self) -> bool {
        matches!(self, Element::ThemeConfig(_) | Element::SpecialEffect(_))
    }
}

/// Element kind metadata for API consumers.
#[derive(Debug, Clone, Serialize)]
pub struct ElementTypeMeta {
    #[serde(rename = "type")]
    pub type_name: &'static str,
    pub label: &'static str,
    pub example: Element,
}

/// Metadata for every element kind, in declaration order.
pub fn element_types() -> Vec<ElementTypeMeta> {
    Element::all_examples()
        .into_iter()
        .map(|e| ElementTypeMeta {
            type_name: e.type_name(),
            label: e.label(),
            example: e,
        })
        .collect()
}

// ============================================================================
// DOCUMENT
// ============================================================================

/// A kept element together with its position in the source array.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEntry {
    pub index: usize,
    pub element: Element,
}

/// Why an entry of the source array was not kept.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NotAnObject,
    UnknownType,
    Malformed(String),
}

/// An entry of the source array that was dropped during parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub index: usize,
    pub type_name: Option<String>,
    pub reason: SkipReason,
}

/// Ordered, read-only list of elements describing one dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutDocument {
    entries: Vec<LayoutEntry>,
    skipped: Vec<SkippedEntry>,
}

impl LayoutDocument {
    /// Build a document directly from elements (indices follow the vec).
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            entries: elements
                .into_iter()
                .enumerate()
                .map(|(index, element)| LayoutEntry { index, element })
                .collect(),
            skipped: Vec::new(),
        }
    }

    /// Parse a JSON value. Only a non-array top level is an error.
    pub fn from_json(value: serde_json::Value) -> Result<Self, TableroError> {
        match value {
            serde_json::Value::Array(items) => Ok(Self::from_values(items)),
            other => Err(TableroError::Layout(format!(
                "expected an array of elements, got {}",
                other
            ))),
        }
    }

    /// Parse each entry independently, keeping what is recognized.
    pub fn from_values(items: Vec<serde_json::Value>) -> Self {
        let mut doc = Self::default();

        for (index, item) in items.into_iter().enumerate() {
            let serde_json::Value::Object(map) = item else {
                debug!(index, "layout entry is not an object, skipping");
                doc.skipped.push(SkippedEntry {
                    index,
                    type_name: None,
                    reason: SkipReason::NotAnObject,
                });
                continue;
            };

            let type_name = map.get("type").and_then(|t| t.as_str()).map(str::to_owned);
            let known = type_name
                .as_deref()
                .is_some_and(|t| ELEMENT_TYPES.contains(&t));
            if !known {
                debug!(index, type_name = ?type_name, "unknown element type, skipping");
                doc.skipped.push(SkippedEntry {
                    index,
                    type_name,
                    reason: SkipReason::UnknownType,
                });
                continue;
            }

            match serde_json::from_value::<Element>(serde_json::Value::Object(map)) {
                Ok(element) => doc.entries.push(LayoutEntry { index, element }),
                Err(e) => {
                    warn!(index, type_name = ?type_name, error = %e, "malformed element, skipping");
                    doc.skipped.push(SkippedEntry {
                        index,
                        type_name,
                        reason: SkipReason::Malformed(e.to_string()),
                    });
                }
            }
        }

        doc
    }

    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.entries.iter().map(|e| &e.element)
    }

    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    /// Number of kept elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for LayoutDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items = Vec::<serde_json::Value>::deserialize(deserializer)?;
        Ok(Self::from_values(items))
    }
}

impl Serialize for LayoutDocument {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.elements())
    }
}
