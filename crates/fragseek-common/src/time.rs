//! Wall-clock timestamp parsing.
//!
//! Program date times are carried as milliseconds since the Unix epoch in
//! `f64`, matching the precision fragments accumulate when durations are
//! added to them.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime};

/// Parse an ISO-8601 timestamp into milliseconds since the epoch.
///
/// Accepts RFC 3339 (`Z` or `+hh:mm` offsets), compact `+hhmm` offsets and,
/// for timestamps without any offset, assumes UTC. Returns `None` for anything
/// unparseable; callers treat that as "no program date time".
pub fn parse_program_date_time(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let millis = if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        dt.timestamp_millis()
    } else if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        dt.timestamp_millis()
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        dt.and_utc().timestamp_millis()
    } else {
        return None;
    };

    Some(millis as f64)
}

/// Parse a user-supplied program date time: either raw milliseconds since
/// the epoch or an ISO-8601 timestamp.
pub fn parse_pdt_argument(value: &str) -> Result<f64> {
    if let Ok(millis) = value.trim().parse::<f64>() {
        if millis.is_finite() && millis > 0.0 {
            return Ok(millis);
        }
    }
    parse_program_date_time(value)
        .ok_or_else(|| Error::invalid_input(format!("Invalid program date time: {}", value)))
}

/// Format milliseconds since the epoch as an RFC 3339 string in UTC.
pub fn format_program_date_time(millis: f64) -> Option<String> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.round() as i64)
        .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}
