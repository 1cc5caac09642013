//! HTTP handlers for the server.

pub mod api;
pub mod dashboard;

use axum::http::StatusCode;

use crate::error::TableroError;

/// HTTP status for a request-level failure.
pub fn status_for(err: &TableroError) -> StatusCode {
    match err {
        TableroError::ConnectionUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        TableroError::DashboardNotFound(_) => StatusCode::NOT_FOUND,
        TableroError::Store(_) | TableroError::Layout(_) => StatusCode::BAD_GATEWAY,
        TableroError::Io(_) | TableroError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error used when the server has no dashboard source.
pub fn unconfigured() -> TableroError {
    TableroError::ConnectionUnavailable("no data store is configured".to_string())
}
