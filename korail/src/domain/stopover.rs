//! Stopovers along a single train's schedule.

use serde::Serialize;

use super::StationStub;
use super::time::{RailInstant, rfc3339};

/// One stop on a train's full schedule.
///
/// `arrival` is absent at the first stop and `departure` at the last.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "stopover")]
pub struct Stopover {
    pub station: StationStub,
    #[serde(serialize_with = "rfc3339::serialize_opt")]
    pub arrival: Option<RailInstant>,
    #[serde(serialize_with = "rfc3339::serialize_opt")]
    pub departure: Option<RailInstant>,
}

impl Stopover {
    /// Returns true if the train arrives and departs here.
    pub fn is_intermediate(&self) -> bool {
        self.arrival.is_some() && self.departure.is_some()
    }
}
