//! Deterministic identities for legs and journeys.
//!
//! Journeys fetched independently (by two anchor queries, or two runs)
//! must get the same id when they describe the same real itinerary. Ids
//! are SHA-256 digests over a fixed, length-prefixed field tuple per leg:
//! origin id, departure, destination id, arrival, line name.

use sha2::{Digest, Sha256};

use super::StationId;
use super::time::RailInstant;

/// The fields that make a leg unique.
#[derive(Debug, Clone, Copy)]
pub struct LegKey<'a> {
    pub origin: &'a StationId,
    pub departure: &'a RailInstant,
    pub destination: &'a StationId,
    pub arrival: &'a RailInstant,
    pub line_name: &'a str,
}

impl LegKey<'_> {
    fn write_to(&self, hasher: &mut Sha256) {
        write_field(hasher, self.origin.as_str().as_bytes());
        write_field(hasher, self.departure.to_rfc3339().as_bytes());
        write_field(hasher, self.destination.as_str().as_bytes());
        write_field(hasher, self.arrival.to_rfc3339().as_bytes());
        write_field(hasher, self.line_name.as_bytes());
    }
}

// Length prefixes keep ("ab", "c") and ("a", "bc") apart.
fn write_field(hasher: &mut Sha256, field: &[u8]) {
    hasher.update((field.len() as u64).to_be_bytes());
    hasher.update(field);
}

/// Hex digest identifying a single leg.
pub fn leg_identity(key: &LegKey<'_>) -> String {
    let mut hasher = Sha256::new();
    key.write_to(&mut hasher);
    hex::encode(hasher.finalize())
}

/// Hex digest identifying an ordered sequence of legs.
pub fn journey_identity<'a>(keys: impl IntoIterator<Item = LegKey<'a>>) -> String {
    let mut hasher = Sha256::new();
    let mut count: u64 = 0;
    for key in keys {
        key.write_to(&mut hasher);
        count += 1;
    }
    hasher.update(count.to_be_bytes());
    hex::encode(hasher.finalize())
}
