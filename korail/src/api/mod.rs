//! Korail mobile API client.
//!
//! This module talks to the backend of Korail's mobile app and turns its
//! responses into domain types.
//!
//! Key characteristics of the Korail API:
//! - Journeys are searched by station **name**, anchored at a date and time;
//!   one call returns a single page of trains departing after the anchor
//! - Dates and times are bare `YYYYMMDD` / `HHmmss` strings in Seoul time
//! - "Nothing found" is reported as a failure with a known message code,
//!   which the client maps to an empty result

mod client;
mod convert;
mod error;
mod mock;
mod provider;
mod types;

pub use client::{KorailClient, KorailConfig};
pub use convert::{
    ConversionError, convert_batch, convert_journey, convert_leg, convert_station,
    convert_stopover, group_legs,
};
pub use error::KorailError;
pub use mock::{DEFAULT_PAGE_SIZE, MockKorailApi};
pub use provider::{JourneyQuery, KorailApi};
pub use types::{
    JourneyResponse, NO_DIRECT_CONNECTIONS, NO_RESULTS, RESULT_FAILURE, RESULT_SUCCESS, RawLeg,
    RawStation, RawStopover, ScheduleResponse, StationListResponse, decode,
};

#[cfg(test)]
pub(crate) use convert::fixtures;
