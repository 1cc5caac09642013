//! # Tablero - Declarative Dashboard Renderer
//!
//! Tablero turns a JSON *layout document* plus a tabular dataset into a
//! rendered dashboard. It provides:
//!
//! - **Layout model**: `type`-tagged elements, parsed tolerantly
//! - **Theme resolution**: colours, typography and page effects
//! - **Chart renderers**: metric, bar/line/area, donut, funnel, gauge, radar, table
//! - **HTML surface**: self-contained pages with inline SVG charts
//! - **Loaders**: memory, file, hosted PostgREST store, TTL cache
//!
//! ## Quick Start
//!
//! ```
//! use tablero::{dataset::Dataset, html, layout::LayoutDocument, render};
//! use serde_json::json;
//!
//! let layout = LayoutDocument::from_json(json!([
//!     {"type": "theme_config", "config": {"primaryColor": "#FF4B4B"}},
//!     {"type": "header", "text": "Monthly sales"},
//!     {"type": "metric", "label": "Total", "column": "sales"},
//!     {"type": "bar_chart", "x": "month", "y": "sales", "title": "By month"}
//! ]))?;
//! let data = Dataset::from_json(json!([
//!     {"month": "Jan", "sales": 1000},
//!     {"month": "Feb", "sales": 234}
//! ]))?;
//!
//! let rendered = render::render(&layout, &data);
//! assert_eq!(rendered.artifacts.len(), 3);
//! assert!(rendered.errors().next().is_none());
//!
//! let page = html::page(&rendered);
//! assert!(page.contains("1,234"));
//! # Ok::<(), tablero::TableroError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`layout`] | Layout document and element types |
//! | [`dataset`] | Column-oriented dataset and value coercion |
//! | [`theme`] | Theme resolution and global directives |
//! | [`render`] | Element dispatcher and chart renderers |
//! | [`html`] | HTML pages and SVG charts |
//! | [`loader`] | Dashboard sources |
//! | [`server`] | HTTP host |
//! | [`config`] | Environment settings and logging |
//! | [`error`] | Error types |

pub mod config;
pub mod dataset;
pub mod error;
pub mod html;
pub mod layout;
pub mod loader;
pub mod render;
pub mod server;
pub mod theme;

// Re-exports for convenience
pub use error::{ElementError, TableroError};
