//! Chart renderers.
//!
//! One pure function per chart kind, mapping the dataset and the element's
//! parameters to a [`Chart`]. A chart is plain data (series, slices,
//! polygons); drawing it is left to the output surface, see
//! [`crate::html::svg`].

use serde::Serialize;

use crate::dataset::{Dataset, Value};
use crate::error::ElementError;
use crate::layout::{DonutChart, FunnelChart, GaugeChart, RadarChart, XyChart};

/// Inner radius of a donut as a fraction of its outer radius. Fixed: a
/// donut is never drawn as a full pie.
pub const DONUT_HOLE: f64 = 0.5;

pub const GAUGE_DEFAULT_MIN: f64 = 0.0;
pub const GAUGE_DEFAULT_MAX: f64 = 100.0;

// ============================================================================
// CHART DATA
// ============================================================================

/// Mark used by a cartesian chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Bar,
    Line,
    Area,
}

/// One y series of a cartesian chart. `None` is a gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// One labelled magnitude (donut slice or funnel stage).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

/// One closed radar polygon: `theta[i]` is the axis of `r[i]`, and the last
/// vertex repeats the first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    pub name: String,
    pub theta: Vec<String>,
    pub r: Vec<f64>,
}

/// Chart geometry, by kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Figure {
    Cartesian {
        mark: Mark,
        x_column: String,
        x: Vec<Value>,
        series: Vec<Series>,
    },
    Donut {
        hole: f64,
        slices: Vec<Slice>,
    },
    Funnel {
        stages: Vec<Slice>,
    },
    Gauge {
        value: f64,
        min: f64,
        max: f64,
    },
    Radar {
        categories: Vec<String>,
        polygons: Vec<Polygon>,
    },
}

/// A rendered chart: optional title plus geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: Option<String>,
    pub figure: Figure,
}

// ============================================================================
// RENDERERS
// ============================================================================

/// Bar, line and area charts: every `y` column plotted against `x`.
pub fn xy(data: &Dataset, mark: Mark, params: &XyChart) -> Result<Chart, ElementError> {
    let x = data.column(&params.x)?.values().to_vec();
    let series = params
        .y
        .columns()
        .into_iter()
        .map(|name| {
            let column = data.column(name)?;
            Ok(Series {
                name: name.to_string(),
                values: column.numbers()?,
            })
        })
        .collect::<Result<Vec<_>, ElementError>>()?;

    Ok(Chart {
        title: params.title.clone(),
        figure: Figure::Cartesian {
            mark,
            x_column: params.x.clone(),
            x,
            series,
        },
    })
}

/// Donut: `value_column` summed per distinct `label_column` value.
///
/// Labels keep first-seen order. Rows with a null label or value are left
/// out.
pub fn donut(data: &Dataset, params: &DonutChart) -> Result<Chart, ElementError> {
    let labels = data.column(&params.label_column)?;
    let values = data.column(&params.value_column)?.numbers()?;

    let mut slices: Vec<Slice> = Vec::new();
    for (label, value) in labels.values().iter().zip(values) {
        let Some(value) = value else { continue };
        if label.is_null() {
            continue;
        }
        let label = label.to_string();
        match slices.iter_mut().find(|s| s.label == label) {
            Some(slice) => slice.value += value,
            None => slices.push(Slice { label, value }),
        }
    }

    Ok(Chart {
        title: params.title.clone(),
        figure: Figure::Donut {
            hole: DONUT_HOLE,
            slices,
        },
    })
}

/// Funnel: stages in dataset order. Narrowing is the drawing's concern.
pub fn funnel(data: &Dataset, params: &FunnelChart) -> Result<Chart, ElementError> {
    let stages = data.column(&params.y_stages)?;
    let values = data.column(&params.x_values)?.numbers()?;

    let stages = stages
        .values()
        .iter()
        .zip(values)
        .filter_map(|(label, value)| {
            value.map(|value| Slice {
                label: label.to_string(),
                value,
            })
        })
        .collect();

    Ok(Chart {
        title: params.title.clone(),
        figure: Figure::Funnel { stages },
    })
}

/// Gauge: the first row's value, not an aggregate.
pub fn gauge(data: &Dataset, params: &GaugeChart) -> Result<Chart, ElementError> {
    if data.is_empty() {
        return Err(ElementError::EmptyDataset);
    }
    let column = data.column(&params.value_column)?;
    let first = column.first().ok_or(ElementError::EmptyDataset)?;
    let value = first.as_f64().ok_or_else(|| column.not_numeric(first))?;

    let min = params.min_value.unwrap_or(GAUGE_DEFAULT_MIN);
    let max = params.max_value.unwrap_or(GAUGE_DEFAULT_MAX);
    if !(min < max) {
        return Err(ElementError::InvalidRange { min, max });
    }

    Ok(Chart {
        title: params.title.clone(),
        figure: Figure::Gauge { value, min, max },
    })
}

/// Radar: one closed polygon per row across the category columns.
///
/// A missing cell sits at the centre (0) so every polygon keeps one vertex
/// per axis. Other non-numeric cells are an error.
pub fn radar(data: &Dataset, params: &RadarChart) -> Result<Chart, ElementError> {
    let names = data.column(&params.name_column)?;
    let axes = params
        .categories
        .iter()
        .map(|c| data.column(c))
        .collect::<Result<Vec<_>, _>>()?;

    let mut polygons = Vec::with_capacity(data.row_count());
    for row in 0..data.row_count() {
        let mut r = Vec::with_capacity(axes.len() + 1);
        for axis in &axes {
            let cell = &axis.values()[row];
            let value = match cell {
                Value::Null => 0.0,
                other => other.as_f64().ok_or_else(|| axis.not_numeric(other))?,
            };
            r.push(value);
        }
        let mut theta = params.categories.clone();
        // Close the polygon.
        if let (Some(&first_r), Some(first_theta)) = (r.first(), params.categories.first()) {
            r.push(first_r);
            theta.push(first_theta.clone());
        }
        polygons.push(Polygon {
            name: names.values()[row].to_string(),
            theta,
            r,
        });
    }

    Ok(Chart {
        title: params.title.clone(),
        figure: Figure::Radar {
            categories: params.categories.clone(),
            polygons,
        },
    })
}
