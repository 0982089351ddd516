//! Journey search over a window of anchor queries.
//!
//! Korail has no "next N trains" or "all trains in a window" call, only a
//! single page of trains departing after an anchor. The planner chains
//! anchor queries through a [`SearchWindow`], merges the batches and
//! applies the caller's filters once the window closes.
//!
//! Queries run strictly one after another: each anchor depends on the
//! batch before it.

use tracing::{debug, trace};

use crate::api::{ConversionError, JourneyQuery, KorailApi, KorailError, convert_batch};
use crate::domain::{InvalidProduct, Journey, now};
use crate::stations::{StationError, StationIndex, StationRef};

use super::config::SearchConfig;
use super::filter::JourneySet;
use super::options::SearchOptions;
use super::window::SearchWindow;

/// Error from journey search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Origin or destination could not be resolved
    #[error(transparent)]
    Station(#[from] StationError),

    /// Unknown product name
    #[error(transparent)]
    InvalidProduct(#[from] InvalidProduct),

    /// Options are inconsistent
    #[error("invalid search options: {0}")]
    InvalidOptions(String),

    /// Korail call failed
    #[error(transparent)]
    Upstream(#[from] KorailError),

    /// Korail returned data that breaks its own contract
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The caller's deadline passed between anchor queries
    #[error("search cancelled after {queries} queries")]
    Cancelled { queries: usize },
}

/// Journey planner over a Korail API.
pub struct JourneyPlanner<'a, A: KorailApi> {
    api: &'a A,
    config: &'a SearchConfig,
}

impl<'a, A: KorailApi> JourneyPlanner<'a, A> {
    /// Create a new planner.
    pub fn new(api: &'a A, config: &'a SearchConfig) -> Self {
        Self { api, config }
    }

    /// Search journeys between two stations.
    ///
    /// Options are validated and both stations resolved before the first
    /// query. Journeys are returned earliest first. Any failure aborts the
    /// whole search; journeys gathered so far are discarded.
    pub async fn search(
        &self,
        stations: &StationIndex,
        origin: &StationRef,
        destination: &StationRef,
        options: &SearchOptions,
    ) -> Result<Vec<Journey>, SearchError> {
        let plan = options.validate(now())?;
        let origin = stations.resolve(origin)?;
        let destination = stations.resolve(destination)?;

        debug!(
            from = %origin.id,
            to = %destination.id,
            start = %plan.start,
            end = ?plan.end,
            product = ?plan.product,
            direct = plan.direct,
            "Starting journey search"
        );

        let mut window = SearchWindow::new(plan.start, plan.end, self.config);
        let mut found = JourneySet::new();
        let mut queries = 0;

        while let Some(anchor) = window.anchor() {
            if plan.is_expired() {
                debug!(queries, "Search deadline passed");
                return Err(SearchError::Cancelled { queries });
            }

            let query = JourneyQuery {
                origin_name: origin.name.clone(),
                destination_name: destination.name.clone(),
                anchor,
                product: plan.product,
                direct: plan.direct,
            };
            let raw = self.api.query_journeys(&query).await?;
            queries += 1;

            let batch = convert_batch(raw, stations)?;
            let departures: Vec<_> = batch.iter().map(Journey::departure).collect();
            let added = found.extend(batch);

            debug!(
                %anchor,
                journeys = departures.len(),
                new = added,
                "Anchor query"
            );

            let state = window.record(departures);
            trace!(?state, "Window moved");
        }

        let journeys = found.finish(&plan, &origin.id, &destination.id);
        debug!(queries, journeys = journeys.len(), "Journey search finished");

        Ok(journeys)
    }
}
