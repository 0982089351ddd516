//! Train leg type.
//!
//! A `Leg` is one uninterrupted ride on a single scheduled train between
//! two stations.

use serde::Serialize;

use super::identity::{LegKey, leg_identity};
use super::time::{RailInstant, rfc3339};
use super::{DomainError, Station, TripId};

/// Operator of every service this crate describes.
pub const OPERATOR: &str = "korail";

/// Transport mode. Korail only runs trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Train,
}

/// The product a line belongs to, as reported by Korail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineProduct {
    /// Korail product code, e.g. `"100"`.
    pub id: String,
    /// Korail product name, e.g. `"KTX"`.
    pub name: String,
}

/// A train line: one train number and its product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "line")]
pub struct Line {
    /// Train number.
    pub id: String,
    /// Display name, `"<class> <number>"`.
    pub name: String,
    pub product: LineProduct,
    pub mode: Mode,
    pub operator: &'static str,
}

impl Line {
    /// Create a Korail train line.
    pub fn new(id: impl Into<String>, name: impl Into<String>, product: LineProduct) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            product,
            mode: Mode::Train,
            operator: OPERATOR,
        }
    }
}

/// A leg of a journey (one train).
///
/// # Invariants
///
/// - `departure <= arrival`
/// - `trip_id` is derived from the line id and the departure's service date
/// - `schedule` is the leg's identity hash
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    origin: Station,
    destination: Station,
    #[serde(serialize_with = "rfc3339::serialize")]
    departure: RailInstant,
    #[serde(serialize_with = "rfc3339::serialize")]
    arrival: RailInstant,
    line: Line,
    mode: Mode,
    public: bool,
    operator: &'static str,
    trip_id: TripId,
    schedule: String,
}

impl Leg {
    /// Construct a leg, deriving its trip id and identity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the leg arrives before it departs or the line id
    /// cannot form a trip id.
    ///
    /// # Examples
    ///
    /// ```
    /// use korail::domain::{Leg, Line, LineProduct, Location, Station, StationId, parse_instant};
    ///
    /// let station = |id: &str, name: &str| Station {
    ///     id: StationId::parse(id).unwrap(),
    ///     name: name.into(),
    ///     location: Location { longitude: 127.0, latitude: 37.0 },
    ///     group: "1".into(),
    ///     major: None,
    /// };
    /// let line = Line::new("101", "KTX 101", LineProduct { id: "100".into(), name: "KTX".into() });
    ///
    /// let leg = Leg::new(
    ///     station("0001", "서울"),
    ///     station("0020", "부산"),
    ///     parse_instant("20240315", "080000").unwrap(),
    ///     parse_instant("20240315", "104500").unwrap(),
    ///     line,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(leg.trip_id().to_string(), "101###20240315");
    /// ```
    pub fn new(
        origin: Station,
        destination: Station,
        departure: RailInstant,
        arrival: RailInstant,
        line: Line,
    ) -> Result<Self, DomainError> {
        if arrival < departure {
            return Err(DomainError::ArrivalBeforeDeparture {
                departure: departure.to_rfc3339(),
                arrival: arrival.to_rfc3339(),
            });
        }

        let trip_id = TripId::new(line.id.clone(), departure.date_naive())?;
        let schedule = leg_identity(&LegKey {
            origin: &origin.id,
            departure: &departure,
            destination: &destination.id,
            arrival: &arrival,
            line_name: &line.name,
        });

        Ok(Leg {
            origin,
            destination,
            departure,
            arrival,
            line,
            mode: Mode::Train,
            public: true,
            operator: OPERATOR,
            trip_id,
            schedule,
        })
    }

    /// Returns the boarding station.
    pub fn origin(&self) -> &Station {
        &self.origin
    }

    /// Returns the alighting station.
    pub fn destination(&self) -> &Station {
        &self.destination
    }

    /// Returns the departure time.
    pub fn departure(&self) -> RailInstant {
        self.departure
    }

    /// Returns the arrival time.
    pub fn arrival(&self) -> RailInstant {
        self.arrival
    }

    /// Returns the line this leg rides.
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Returns the trip handle for schedule lookups.
    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    /// Returns the leg's identity hash.
    pub fn schedule(&self) -> &str {
        &self.schedule
    }

    /// Returns the identity fields of this leg.
    pub fn key(&self) -> LegKey<'_> {
        LegKey {
            origin: &self.origin.id,
            departure: &self.departure,
            destination: &self.destination.id,
            arrival: &self.arrival,
            line_name: &self.line.name,
        }
    }

    /// Returns the ride duration.
    pub fn duration(&self) -> chrono::Duration {
        self.arrival.signed_duration_since(self.departure)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::domain::{Location, StationId, parse_instant};

    pub fn station(id: &str, name: &str) -> Station {
        Station {
            id: StationId::parse(id).unwrap(),
            name: name.into(),
            location: Location {
                longitude: 127.0,
                latitude: 36.0,
            },
            group: "1".into(),
            major: None,
        }
    }

    pub fn ktx(number: &str) -> Line {
        Line::new(
            number,
            format!("KTX {number}"),
            LineProduct {
                id: "100".into(),
                name: "KTX".into(),
            },
        )
    }

    /// Build a same-day leg from `HHmmss` times on 2024-03-15.
    pub fn leg(from: (&str, &str), to: (&str, &str), dep: &str, arr: &str, number: &str) -> Leg {
        Leg::new(
            station(from.0, from.1),
            station(to.0, to.1),
            parse_instant("20240315", dep).unwrap(),
            parse_instant("20240315", arr).unwrap(),
            ktx(number),
        )
        .unwrap()
    }
}
