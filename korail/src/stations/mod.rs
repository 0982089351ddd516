//! Station Directory.
//!
//! Resolves caller station references (a bare code or anything exposing an
//! `id`) against Korail's station list. The list is fetched in one bulk
//! call and held in memory; lookups after that are read-only.

mod directory;
mod error;
mod reference;

pub use directory::{StationDirectory, StationIndex, load_index};
pub use error::StationError;
pub use reference::StationRef;
