//! The seam between the adapter and Korail.

use std::future::Future;

use crate::domain::{ALL_PRODUCTS_CODE, Product, RailInstant, TripId, format_day, format_time};

use super::error::KorailError;
use super::types::{RawLeg, RawStation, RawStopover};

/// Routing mode code for direct trains only.
const ROUTING_DIRECT: &str = "1";

/// Routing mode code for any itinerary, transfers included.
const ROUTING_ANY: &str = "5";

/// One anchored journey query: trains departing at or after `anchor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyQuery {
    /// Origin station name. Korail searches by name, not code.
    pub origin_name: String,
    /// Destination station name.
    pub destination_name: String,
    pub anchor: RailInstant,
    pub product: Option<Product>,
    pub direct: bool,
}

impl JourneyQuery {
    /// Anchor date as `YYYYMMDD`.
    pub fn day(&self) -> String {
        format_day(&self.anchor)
    }

    /// Anchor time as `HHmmss`.
    pub fn time(&self) -> String {
        format_time(&self.anchor)
    }

    /// Korail product code, `109` when unrestricted.
    pub fn product_code(&self) -> &'static str {
        self.product.map(Product::code).unwrap_or(ALL_PRODUCTS_CODE)
    }

    /// Korail routing mode code.
    pub fn routing_code(&self) -> &'static str {
        if self.direct { ROUTING_DIRECT } else { ROUTING_ANY }
    }
}

/// Trait for the three Korail operations the adapter consumes.
///
/// This abstraction allows the planner to be tested with scripted data.
/// Journey queries that Korail answers with one of its "nothing found"
/// codes resolve to an empty list, never an error.
pub trait KorailApi {
    /// Fetch the full station list.
    fn fetch_stations(&self) -> impl Future<Output = Result<Vec<RawStation>, KorailError>> + Send;

    /// Run one anchored journey query. Legs come back unsorted.
    fn query_journeys(
        &self,
        query: &JourneyQuery,
    ) -> impl Future<Output = Result<Vec<RawLeg>, KorailError>> + Send;

    /// Fetch the full schedule of one train run.
    fn train_schedule(
        &self,
        trip: &TripId,
    ) -> impl Future<Output = Result<Vec<RawStopover>, KorailError>> + Send;
}
