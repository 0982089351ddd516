//! Korail time handling.
//!
//! Korail sends dates and times as bare digit strings (`YYYYMMDD`, `HHmmss`)
//! with no zone attached. Every instant is a civil time in Seoul, so the
//! zone is supplied here rather than read from the payload.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// The railway's home time zone.
pub const RAIL_TZ: Tz = chrono_tz::Asia::Seoul;

/// Time value Korail uses when a stop has no arrival or no departure.
pub const NOT_APPLICABLE: &str = "999999";

/// An instant in the railway's home zone.
pub type RailInstant = DateTime<Tz>;

/// Error returned when parsing an invalid Korail date or time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {value:?}: {reason}")]
pub struct TimeError {
    value: String,
    reason: &'static str,
}

impl TimeError {
    fn new(value: impl Into<String>, reason: &'static str) -> Self {
        Self {
            value: value.into(),
            reason,
        }
    }
}

/// Parse a Korail `YYYYMMDD` date.
///
/// # Examples
///
/// ```
/// use korail::domain::parse_day;
///
/// let day = parse_day("20240315").unwrap();
/// assert_eq!(day.to_string(), "2024-03-15");
///
/// assert!(parse_day("2024031").is_err());
/// assert!(parse_day("20241315").is_err());
/// ```
pub fn parse_day(day: &str) -> Result<NaiveDate, TimeError> {
    if day.len() != 8 || !day.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::new(day, "expected 8 digits (YYYYMMDD)"));
    }
    NaiveDate::parse_from_str(day, "%Y%m%d").map_err(|_| TimeError::new(day, "not a calendar date"))
}

/// Parse a Korail date + time pair into an instant in the home zone.
///
/// # Examples
///
/// ```
/// use korail::domain::parse_instant;
///
/// let t = parse_instant("20240315", "080000").unwrap();
/// assert_eq!(t.to_rfc3339(), "2024-03-15T08:00:00+09:00");
/// ```
pub fn parse_instant(day: &str, time: &str) -> Result<RailInstant, TimeError> {
    parse_day(day)?;

    if time.len() != 6 || !time.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::new(time, "expected 6 digits (HHmmss)"));
    }
    let naive = NaiveDateTime::parse_from_str(&format!("{day}{time}"), "%Y%m%d%H%M%S")
        .map_err(|_| TimeError::new(time, "not a time of day"))?;

    RAIL_TZ
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| TimeError::new(format!("{day}{time}"), "ambiguous local time"))
}

/// Parse a date + time pair where the time may be the "not applicable"
/// sentinel.
///
/// Returns `Ok(None)` for the sentinel; it never maps to an error or to a
/// zero timestamp.
pub fn parse_optional_instant(day: &str, time: &str) -> Result<Option<RailInstant>, TimeError> {
    if time == NOT_APPLICABLE {
        return Ok(None);
    }
    parse_instant(day, time).map(Some)
}

/// Convert any instant into the home zone.
pub fn to_rail_time<Z: TimeZone>(instant: &DateTime<Z>) -> RailInstant {
    instant.with_timezone(&RAIL_TZ)
}

/// The current instant in the home zone.
pub fn now() -> RailInstant {
    to_rail_time(&chrono::Utc::now())
}

/// Format the service date part of an instant as `YYYYMMDD`.
pub fn format_day(instant: &RailInstant) -> String {
    instant.format("%Y%m%d").to_string()
}

/// Format the time-of-day part of an instant as `HHmmss`.
pub fn format_time(instant: &RailInstant) -> String {
    instant.format("%H%M%S").to_string()
}

/// Serde helpers writing instants as RFC 3339 with a numeric offset.
pub(crate) mod rfc3339 {
    use serde::Serializer;

    use super::RailInstant;

    pub fn serialize<S: Serializer>(instant: &RailInstant, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&instant.to_rfc3339())
    }

    pub fn serialize_opt<S: Serializer>(
        instant: &Option<RailInstant>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match instant {
            Some(instant) => s.serialize_str(&instant.to_rfc3339()),
            None => s.serialize_none(),
        }
    }
}
