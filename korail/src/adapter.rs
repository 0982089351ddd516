//! The public entry point.

use crate::api::{KorailApi, KorailClient, KorailConfig, KorailError};
use crate::domain::{Journey, Station, Stopover};
use crate::planner::{JourneyPlanner, SearchConfig, SearchError, SearchOptions};
use crate::stations::{StationDirectory, StationError, StationRef};
use crate::trips::{TripError, trip_stopovers};

/// Korail adapter: stations, journeys and trip stopovers.
///
/// The station list is fetched on first use and kept for the adapter's
/// lifetime; call [`refresh_stations`](Self::refresh_stations) to refetch.
pub struct Korail<A: KorailApi = KorailClient> {
    api: A,
    config: SearchConfig,
    stations: StationDirectory,
}

impl Korail<KorailClient> {
    /// An adapter talking to Korail over HTTP.
    pub fn connect(config: KorailConfig) -> Result<Self, KorailError> {
        Ok(Self::new(KorailClient::new(config)?))
    }
}

impl<A: KorailApi> Korail<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            config: SearchConfig::default(),
            stations: StationDirectory::new(),
        }
    }

    /// Use custom window steps for journey searches.
    pub fn with_search_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Every station Korail lists.
    pub async fn stations(&self) -> Result<Vec<Station>, StationError> {
        let index = self.stations.snapshot(&self.api).await?;
        Ok(index.all().to_vec())
    }

    /// Resolve one station reference.
    pub async fn station(&self, reference: impl Into<StationRef>) -> Result<Station, StationError> {
        let index = self.stations.snapshot(&self.api).await?;
        index.resolve(&reference.into()).cloned()
    }

    /// Journeys between two stations.
    pub async fn journeys(
        &self,
        origin: impl Into<StationRef>,
        destination: impl Into<StationRef>,
        options: &SearchOptions,
    ) -> Result<Vec<Journey>, SearchError> {
        let index = self.stations.snapshot(&self.api).await?;
        JourneyPlanner::new(&self.api, &self.config)
            .search(&index, &origin.into(), &destination.into(), options)
            .await
    }

    /// All stops of the train run a leg's `tripId` refers to.
    pub async fn trip_stopovers(&self, trip_id: &str) -> Result<Vec<Stopover>, TripError> {
        trip_stopovers(&self.api, trip_id).await
    }

    /// Refetch the station list. Returns the number of stations loaded.
    pub async fn refresh_stations(&self) -> Result<usize, StationError> {
        self.stations.refresh(&self.api).await
    }
}
