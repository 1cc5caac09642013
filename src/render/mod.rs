//! # Element Dispatcher
//!
//! Renders a [`LayoutDocument`] against a [`Dataset`] in two passes:
//!
//! 1. **Global pass**: theme and effects are folded into one
//!    [`GlobalDirectives`] value, wherever they sit in the document.
//! 2. **Visual pass**: every other element is rendered in document order.
//!
//! Each visual element is isolated. A column that does not exist or data
//! of the wrong type turns that element into an [`Artifact::Error`]; the
//! rest of the document still renders.
//!
//! ```
//! use tablero::{dataset::Dataset, layout::LayoutDocument, render};
//! use serde_json::json;
//!
//! let doc = LayoutDocument::from_json(json!([
//!     {"type": "metric", "label": "Revenue", "column": "sales"},
//!     {"type": "metric", "label": "Broken", "column": "nope"},
//!     {"type": "header", "text": "Still rendered"}
//! ]))?;
//! let data = Dataset::from_json(json!([{"sales": 1000}, {"sales": 234}]))?;
//!
//! let out = render::render(&doc, &data);
//! assert_eq!(out.artifacts.len(), 3);
//! assert!(matches!(
//!     &out.artifacts[0],
//!     render::Artifact::Metric { value, .. } if value == "1,234"
//! ));
//! assert!(out.artifacts[1].is_error());
//! # Ok::<(), tablero::TableroError>(())
//! ```

pub mod chart;
pub mod format;

use serde::Serialize;
use tracing::{debug, warn};

use crate::dataset::{Dataset, Value};
use crate::error::ElementError;
use crate::layout::{Element, LayoutDocument, Metric, Table};
use crate::theme::{Effect, GlobalDirectives, PresentationDirectives};

pub use chart::{Chart, Figure, Mark};

/// One rendered block of the dashboard, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artifact {
    Header {
        text: String,
    },
    Markdown {
        text: String,
    },
    Metric {
        label: String,
        /// Display string with thousands separators.
        value: String,
        raw: f64,
    },
    Chart(Chart),
    Table {
        title: String,
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
    /// An element that could not be rendered against this dataset.
    Error {
        /// Position of the element in the source document.
        index: usize,
        element_type: String,
        message: String,
    },
}

impl Artifact {
    pub fn is_error(&self) -> bool {
        matches!(self, Artifact::Error { .. })
    }
}

/// Full result of rendering one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rendered {
    /// Resolved theme; `None` leaves the surface's default styling.
    pub theme: Option<PresentationDirectives>,
    pub effects: Vec<Effect>,
    pub artifacts: Vec<Artifact>,
}

impl Rendered {
    /// Per-element failures, in document order.
    pub fn errors(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter().filter(|a| a.is_error())
    }
}

/// Render a document. Never fails as a whole.
pub fn render(doc: &LayoutDocument, data: &Dataset) -> Rendered {
    let globals = GlobalDirectives::collect(doc);

    let mut artifacts = Vec::with_capacity(doc.len());
    for entry in doc.entries() {
        if entry.element.is_global() {
            continue;
        }
        match render_element(&entry.element, data) {
            Ok(Some(artifact)) => artifacts.push(artifact),
            Ok(None) => {}
            Err(e) => {
                warn!(
                    index = entry.index,
                    element_type = entry.element.type_name(),
                    error = %e,
                    "element failed to render"
                );
                artifacts.push(Artifact::Error {
                    index: entry.index,
                    element_type: entry.element.type_name().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    debug!(
        elements = doc.len(),
        skipped = doc.skipped().len(),
        artifacts = artifacts.len(),
        "rendered layout document"
    );

    Rendered {
        theme: globals.theme,
        effects: globals.effects,
        artifacts,
    }
}

/// Render one visual element. Global elements yield `None`; they were
/// applied in the global pass.
pub fn render_element(element: &Element, data: &Dataset) -> Result<Option<Artifact>, ElementError> {
    let artifact = match element {
        Element::ThemeConfig(_) | Element::SpecialEffect(_) => return Ok(None),
        Element::Header(h) => Artifact::Header {
            text: h.text.clone(),
        },
        Element::Markdown(m) => Artifact::Markdown {
            text: m.text.clone(),
        },
        Element::Metric(m) => metric(data, m)?,
        Element::BarChart(c) => Artifact::Chart(chart::xy(data, Mark::Bar, c)?),
        Element::LineChart(c) => Artifact::Chart(chart::xy(data, Mark::Line, c)?),
        Element::AreaChart(c) => Artifact::Chart(chart::xy(data, Mark::Area, c)?),
        Element::DonutChart(c) => Artifact::Chart(chart::donut(data, c)?),
        Element::FunnelChart(c) => Artifact::Chart(chart::funnel(data, c)?),
        Element::GaugeChart(c) => Artifact::Chart(chart::gauge(data, c)?),
        Element::RadarChart(c) => Artifact::Chart(chart::radar(data, c)?),
        Element::Table(t) => table(data, t),
    };
    Ok(Some(artifact))
}

/// Metric: the column's sum over all rows.
fn metric(data: &Dataset, params: &Metric) -> Result<Artifact, ElementError> {
    let total = data.column(&params.column)?.sum()?;
    Ok(Artifact::Metric {
        label: params.label.clone(),
        value: format::grouped(total),
        raw: total,
    })
}

/// Table: the dataset verbatim.
fn table(data: &Dataset, params: &Table) -> Artifact {
    Artifact::Table {
        title: params
            .title
            .clone()
            .unwrap_or_else(|| Table::DEFAULT_TITLE.to_string()),
        columns: data.column_names().map(str::to_string).collect(),
        rows: data
            .rows()
            .map(|row| row.into_iter().cloned().collect())
            .collect(),
    }
}
