//! Accumulating and filtering search results.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{Journey, StationId};

use super::options::SearchPlan;

/// Journeys gathered across anchor queries, without duplicates.
#[derive(Debug, Default)]
pub struct JourneySet {
    seen: HashSet<String>,
    journeys: Vec<Journey>,
}

impl JourneySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a batch, skipping journeys already held. Returns how many were new.
    pub fn extend(&mut self, batch: impl IntoIterator<Item = Journey>) -> usize {
        let before = self.journeys.len();
        for journey in batch {
            if self.seen.insert(journey.id().to_string()) {
                self.journeys.push(journey);
            }
        }
        self.journeys.len() - before
    }

    pub fn len(&self) -> usize {
        self.journeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.journeys.is_empty()
    }

    /// Sort and filter the accumulated journeys for the caller.
    pub fn finish(self, plan: &SearchPlan, origin: &StationId, destination: &StationId) -> Vec<Journey> {
        finalize(self.journeys, plan, origin, destination)
    }
}

/// Order journeys by first-leg departure, then by arrival.
pub fn sort_by_departure(journeys: &mut [Journey]) {
    journeys.sort_by_key(|j| (j.departure(), j.arrival()));
}

/// Apply the plan's bounds and caps to a set of journeys.
///
/// Keeps journeys that depart inside the window, run between the resolved
/// endpoints and respect the transfer cap, then takes the earliest
/// `results` of them.
pub fn finalize(
    mut journeys: Vec<Journey>,
    plan: &SearchPlan,
    origin: &StationId,
    destination: &StationId,
) -> Vec<Journey> {
    sort_by_departure(&mut journeys);

    journeys.retain(|journey| {
        let departure = journey.departure();
        if departure < plan.start || plan.end.is_some_and(|end| departure > end) {
            return false;
        }
        if &journey.origin().id != origin || &journey.destination().id != destination {
            debug!(
                journey = journey.id(),
                from = %journey.origin().id,
                to = %journey.destination().id,
                "Dropping journey between other stations"
            );
            return false;
        }
        plan.transfers
            .is_none_or(|transfers| journey.transfers() <= transfers)
    });

    if let Some(results) = plan.results {
        journeys.truncate(results);
    }
    journeys
}
