//! Trip identifiers.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::time::parse_day;

/// Separator between the line id and the service date.
const SEPARATOR: &str = "###";

/// Error returned when decoding an invalid trip id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid trip id {value:?}: {reason}")]
pub struct InvalidTripId {
    value: String,
    reason: &'static str,
}

/// Identifies one run of a train on one service date.
///
/// Encoded as `<lineId>###<YYYYMMDD>`. Train numbers repeat every day, so
/// the service date is what makes the id unique.
///
/// # Examples
///
/// ```
/// use korail::domain::TripId;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let trip = TripId::new("101", date).unwrap();
/// assert_eq!(trip.to_string(), "101###20240315");
///
/// let parsed = TripId::parse("101###20240315").unwrap();
/// assert_eq!(parsed, trip);
///
/// assert!(TripId::parse("101").is_err());
/// assert!(TripId::parse("101###2024031").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct TripId {
    line_id: String,
    service_date: NaiveDate,
}

impl TripId {
    /// Build a trip id from a line id and service date.
    pub fn new(line_id: impl Into<String>, service_date: NaiveDate) -> Result<Self, InvalidTripId> {
        let line_id = line_id.into();
        if line_id.is_empty() {
            return Err(InvalidTripId {
                value: line_id,
                reason: "line id must not be empty",
            });
        }
        if line_id.contains(SEPARATOR) {
            return Err(InvalidTripId {
                value: line_id,
                reason: "line id must not contain the separator",
            });
        }
        Ok(Self {
            line_id,
            service_date,
        })
    }

    /// Decode a `<lineId>###<YYYYMMDD>` string.
    pub fn parse(s: &str) -> Result<Self, InvalidTripId> {
        let invalid = |reason| InvalidTripId {
            value: s.to_string(),
            reason,
        };

        let (line_id, day) = s
            .split_once(SEPARATOR)
            .ok_or_else(|| invalid("missing separator"))?;
        if line_id.is_empty() {
            return Err(invalid("line id must not be empty"));
        }
        let service_date = parse_day(day).map_err(|_| invalid("service date must be YYYYMMDD"))?;

        Ok(Self {
            line_id: line_id.to_string(),
            service_date,
        })
    }

    /// The train number.
    pub fn line_id(&self) -> &str {
        &self.line_id
    }

    /// The service date this run is keyed to.
    pub fn service_date(&self) -> NaiveDate {
        self.service_date
    }

    /// The service date as Korail's `YYYYMMDD`.
    pub fn service_day(&self) -> String {
        self.service_date.format("%Y%m%d").to_string()
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.line_id, self.service_day())
    }
}

impl From<TripId> for String {
    fn from(trip: TripId) -> Self {
        trip.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_parts() {
        assert!(TripId::parse("").is_err());
        assert!(TripId::parse("###20240315").is_err());
        assert!(TripId::parse("101###").is_err());
        assert!(TripId::parse("101##20240315").is_err());
    }

    #[test]
    fn rejects_non_dates() {
        assert!(TripId::parse("101###2024031a").is_err());
        assert!(TripId::parse("101###20240230").is_err());
        assert!(TripId::parse("101###202403150").is_err());
    }

    #[test]
    fn rejects_separator_in_line_id() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert!(TripId::new("1###2", date).is_err());
        assert!(TripId::new("", date).is_err());
    }

    #[test]
    fn serializes_as_string() {
        let trip = TripId::parse("524###20240315").unwrap();
        assert_eq!(
            serde_json::to_value(&trip).unwrap(),
            serde_json::json!("524###20240315")
        );
    }
}
