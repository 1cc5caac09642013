//! # Error Types
//!
//! This module defines error types used throughout the tablero library.
//!
//! [`TableroError`] covers request-level failures that stop a whole render.
//! [`ElementError`] covers a single element whose parameters do not fit the
//! dataset; those are reported inline and never abort the document.

use thiserror::Error;

/// Main error type for tablero operations
#[derive(Debug, Error)]
pub enum TableroError {
    /// The data store cannot be reached or is not configured
    #[error("Could not connect to the data store: {0}")]
    ConnectionUnavailable(String),

    /// No dashboard (or no data for it) under this identifier
    #[error("Could not load the dashboard with ID: `{0}`. Please check the ID.")]
    DashboardNotFound(String),

    /// The data store answered, but not with something we can use
    #[error("Data store error: {0}")]
    Store(String),

    /// The layout document is not a JSON array
    #[error("Invalid layout document: {0}")]
    Layout(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to render one element against the dataset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ElementError {
    #[error("column '{0}' does not exist in the dataset")]
    MissingColumn(String),

    #[error("column '{column}' holds non-numeric data ({found})")]
    NotNumeric { column: String, found: String },

    #[error("the dataset has no rows")]
    EmptyDataset,

    #[error("invalid range: min {min} must be below max {max}")]
    InvalidRange { min: f64, max: f64 },
}
