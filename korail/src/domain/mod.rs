//! Domain types for the Korail adapter.
//!
//! This module contains the public-transport data model the adapter
//! produces. All types enforce their invariants at construction time, so
//! code that receives these types can trust their validity.

mod error;
mod identity;
mod journey;
pub(crate) mod leg;
mod product;
mod station;
mod stopover;
mod time;
mod trip_id;

pub use error::DomainError;
pub use identity::{LegKey, journey_identity, leg_identity};
pub use journey::{CURRENCY, Journey, Price};
pub use leg::{Leg, Line, LineProduct, Mode, OPERATOR};
pub use product::{ALL_PRODUCTS_CODE, InvalidProduct, Product};
pub use station::{InvalidStationId, Location, Station, StationId, StationStub};
pub use stopover::Stopover;
pub use time::{
    NOT_APPLICABLE, RAIL_TZ, RailInstant, TimeError, format_day, format_time, now, parse_day,
    parse_instant, parse_optional_instant, to_rail_time,
};
pub use trip_id::{InvalidTripId, TripId};
