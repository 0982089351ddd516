//! Station types.

use std::fmt;

use serde::Serialize;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A Korail station code (e.g. `"0001"` for Seoul).
///
/// Codes are operator-scoped opaque strings. Leading zeros are significant,
/// so codes are never treated as numbers.
///
/// # Examples
///
/// ```
/// use korail::domain::StationId;
///
/// let seoul = StationId::parse("0001").unwrap();
/// assert_eq!(seoul.as_str(), "0001");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("  ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Parse a station code, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }
        Ok(StationId(trimmed.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// WGS84 coordinates of a station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename = "location")]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

/// A station as published in Korail's station list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "station")]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub location: Location,
    /// Korail's regional grouping for the station.
    pub group: String,
    /// Set for stations Korail flags as major stops.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<bool>,
}

/// The short station form used inside stopovers: code and name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "station")]
pub struct StationStub {
    pub id: StationId,
    pub name: String,
}

impl From<&Station> for StationStub {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id.clone(),
            name: station.name.clone(),
        }
    }
}
