//! Journey Search Window Controller.
//!
//! Answers "which trains run from A to B after this time?" on top of
//! Korail's single anchored query. The search is a chain of anchor
//! queries driven by a small state machine, followed by one pass of
//! deduplication, sorting and filtering.

mod config;
mod filter;
mod options;
mod search;
mod window;


pub use config::SearchConfig;
pub use filter::{JourneySet, finalize, sort_by_departure};
pub use options::{SearchOptions, SearchPlan};
pub use search::{JourneyPlanner, SearchError};
pub use window::{SearchWindow, WindowState};
