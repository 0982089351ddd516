//! Korail railway adapter.
//!
//! Queries Korail's mobile reservation API and normalizes its stations,
//! journeys and train schedules into a public-transport data schema.
//!
//! ```no_run
//! use korail::{Korail, KorailConfig, SearchOptions};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let korail = Korail::connect(KorailConfig::new())?;
//! let options = SearchOptions::new().with_interval(120).with_product("KTX");
//! let journeys = korail.journeys("0001", "0020", &options).await?;
//! println!("{}", serde_json::to_string_pretty(&journeys)?);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod api;
pub mod domain;
pub mod planner;
pub mod stations;
pub mod trips;

pub use adapter::Korail;
pub use api::{KorailApi, KorailClient, KorailConfig};
pub use planner::{SearchConfig, SearchOptions};
