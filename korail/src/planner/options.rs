//! Caller-facing search options.

use chrono::Duration;
use tokio::time::Instant;

use crate::domain::{Product, RailInstant, to_rail_time};

use super::search::SearchError;

/// Options for a journey search. Every field is optional.
///
/// | option | default |
/// |---|---|
/// | `departure_after` | now |
/// | `results` | unlimited |
/// | `transfers` | unlimited |
/// | `interval_mins` | none: a single anchor query |
/// | `product` | every product |
/// | `direct` | `false` |
/// | `deadline` | none |
///
/// # Examples
///
/// ```
/// use korail::domain::parse_instant;
/// use korail::planner::SearchOptions;
///
/// let options = SearchOptions::new()
///     .when(parse_instant("20240315", "080000").unwrap())
///     .with_interval(120)
///     .with_product("KTX")
///     .with_results(5);
/// assert_eq!(options.interval_mins, Some(120));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Earliest first-leg departure.
    pub departure_after: Option<RailInstant>,
    /// Keep at most this many journeys, earliest first.
    pub results: Option<usize>,
    /// Keep only journeys with at most this many changes.
    pub transfers: Option<usize>,
    /// Cover `[departure_after, departure_after + interval]` with as many
    /// anchor queries as needed.
    pub interval_mins: Option<i64>,
    /// Product name, e.g. `"KTX"`.
    pub product: Option<String>,
    /// Ask Korail for direct trains only.
    pub direct: bool,
    /// Abort between anchor queries once this instant has passed.
    pub deadline: Option<Instant>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the earliest departure.
    pub fn departing_after<Z: chrono::TimeZone>(mut self, instant: chrono::DateTime<Z>) -> Self {
        self.departure_after = Some(to_rail_time(&instant));
        self
    }

    /// Same as [`departing_after`](Self::departing_after).
    pub fn when<Z: chrono::TimeZone>(self, instant: chrono::DateTime<Z>) -> Self {
        self.departing_after(instant)
    }

    pub fn with_results(mut self, results: usize) -> Self {
        self.results = Some(results);
        self
    }

    pub fn with_transfers(mut self, transfers: usize) -> Self {
        self.transfers = Some(transfers);
        self
    }

    /// Search a window of `mins` minutes instead of a single anchor.
    pub fn with_interval(mut self, mins: i64) -> Self {
        self.interval_mins = Some(mins);
        self
    }

    pub fn with_product(mut self, name: impl Into<String>) -> Self {
        self.product = Some(name.into());
        self
    }

    pub fn direct(mut self) -> Self {
        self.direct = true;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Check the options and fill in defaults.
    ///
    /// Runs before any network call. `now` is used when no departure time
    /// was given.
    pub fn validate(&self, now: RailInstant) -> Result<SearchPlan, SearchError> {
        let start = self.departure_after.unwrap_or(now);

        let end = match self.interval_mins {
            None => None,
            Some(mins) if mins < 0 => {
                return Err(SearchError::InvalidOptions(format!(
                    "interval must not be negative, got {mins}"
                )));
            }
            Some(mins) => Some(
                Duration::try_minutes(mins)
                    .and_then(|interval| start.checked_add_signed(interval))
                    .ok_or_else(|| {
                        SearchError::InvalidOptions(format!("interval of {mins} minutes is too long"))
                    })?,
            ),
        };

        if self.results == Some(0) {
            return Err(SearchError::InvalidOptions(
                "results must be at least 1".to_string(),
            ));
        }

        let product = self.product.as_deref().map(Product::parse).transpose()?;

        Ok(SearchPlan {
            start,
            end,
            results: self.results,
            transfers: self.transfers,
            product,
            direct: self.direct,
            deadline: self.deadline,
        })
    }
}

/// Validated search options.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan {
    pub start: RailInstant,
    /// End of the window; `None` for a single anchor query.
    pub end: Option<RailInstant>,
    pub results: Option<usize>,
    pub transfers: Option<usize>,
    pub product: Option<Product>,
    pub direct: bool,
    pub deadline: Option<Instant>,
}

impl SearchPlan {
    /// True once the caller's deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}
