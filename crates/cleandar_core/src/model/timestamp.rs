//! Wall-clock timestamp text forms.
//!
//! Stored timestamps carry no zone and read as host local time, the same
//! wall clock `SystemClock` stamps with. Decoding also accepts RFC 3339
//! values with an offset, which are converted to local wall time.

use super::ModelError;
use chrono::{DateTime, Local, NaiveDateTime};

const STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats for persisted state, e.g. `2024-03-02T10:00:00`.
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(STORAGE_FORMAT).to_string()
}

/// Formats for human-facing output, e.g. `2024-03-02 10:00:00`.
pub fn format_display_timestamp(value: &NaiveDateTime) -> String {
    value.format(DISPLAY_FORMAT).to_string()
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ModelError> {
    let trimmed = value.trim();
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, STORAGE_FORMAT) {
        return Ok(parsed);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|parsed| parsed.with_timezone(&Local).naive_local())
        .map_err(|_| ModelError::InvalidTimestamp(value.to_string()))
}
