//! Load-time coercion of date/time columns.
//!
//! A column is temporal when its name contains `date` or `time`. Every value
//! in such a column is converted to a [`Value::Timestamp`]; values that do
//! not parse become [`Value::Null`] instead of raising.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::Value;

/// Naive datetime layouts, tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Datetime layouts carrying a short UTC offset (e.g. Postgres `+00`).
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Date-only layouts; the time is set to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Whether a column name triggers timestamp coercion.
pub fn is_temporal_column(name: &str) -> bool {
    name.contains("date") || name.contains("time")
}

/// Coerce one value of a temporal column.
pub fn coerce(value: Value) -> Value {
    match value {
        Value::Timestamp(ts) => Value::Timestamp(ts),
        Value::Text(s) => parse_timestamp(&s).map_or(Value::Null, Value::Timestamp),
        Value::Number(n) => from_epoch_seconds(n).map_or(Value::Null, Value::Timestamp),
        Value::Null | Value::Bool(_) => Value::Null,
    }
}

/// Parse a timestamp string. Offsets are normalized to UTC.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_utc());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Interpret a number as Unix epoch seconds.
fn from_epoch_seconds(secs: f64) -> Option<NaiveDateTime> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos).map(|dt| dt.naive_utc())
}
