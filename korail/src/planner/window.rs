//! The anchor window state machine.
//!
//! Korail answers a query with one page of trains departing at or after an
//! anchor instant. To cover a time window the planner issues a chain of
//! anchor queries, each placed from what the previous one returned:
//!
//! - after a non-empty batch, just past the latest departure seen
//!   ([`WindowState::Advancing`])
//! - after an empty batch, one probe step later ([`WindowState::Probing`])
//!
//! The window is [`WindowState::Done`] when no interval was requested, when
//! the next anchor falls past the window end, or when the anchor failed to
//! move forward. Every transition that is not `Done` strictly increases
//! the anchor, so the chain always terminates.

use chrono::Duration;

use crate::domain::RailInstant;

use super::config::SearchConfig;

/// Where the next anchor query goes, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// Query at this anchor with no departures seen near it yet.
    Probing(RailInstant),
    /// Query at this anchor, just past the latest departure seen.
    Advancing(RailInstant),
    /// No more queries.
    Done,
}

impl WindowState {
    /// The anchor to query, unless done.
    pub fn anchor(self) -> Option<RailInstant> {
        match self {
            WindowState::Probing(anchor) | WindowState::Advancing(anchor) => Some(anchor),
            WindowState::Done => None,
        }
    }
}

/// Anchor bookkeeping for one search.
#[derive(Debug, Clone)]
pub struct SearchWindow {
    state: WindowState,
    end: Option<RailInstant>,
    probe_step: Duration,
    advance_step: Duration,
}

impl SearchWindow {
    /// Start a window at `start`. Without an `end` only one query is made.
    pub fn new(start: RailInstant, end: Option<RailInstant>, config: &SearchConfig) -> Self {
        Self {
            state: WindowState::Probing(start),
            end,
            probe_step: config.probe_step(),
            advance_step: config.advance_step(),
        }
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    /// The anchor for the next query, or `None` when done.
    pub fn anchor(&self) -> Option<RailInstant> {
        self.state.anchor()
    }

    pub fn is_done(&self) -> bool {
        self.state == WindowState::Done
    }

    /// Record the first-leg departures of the batch just fetched at the
    /// current anchor and move to the next state.
    pub fn record(&mut self, departures: impl IntoIterator<Item = RailInstant>) -> WindowState {
        let Some(current) = self.anchor() else {
            return WindowState::Done;
        };

        let next = match departures.into_iter().max() {
            Some(latest) => latest
                .checked_add_signed(self.advance_step)
                .map(WindowState::Advancing),
            None => current
                .checked_add_signed(self.probe_step)
                .map(WindowState::Probing),
        };

        self.state = match (next, self.end) {
            (Some(next), Some(end)) => match next.anchor() {
                Some(anchor) if anchor > current && anchor <= end => next,
                _ => WindowState::Done,
            },
            _ => WindowState::Done,
        };
        self.state
    }
}
