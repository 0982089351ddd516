//! Station lookup by code.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::api::{KorailApi, RawStation, convert_station};
use crate::domain::{Station, StationId};

use super::error::StationError;
use super::reference::StationRef;

/// An immutable station list indexed by code.
///
/// Keeps stations in the order Korail lists them.
#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    stations: Vec<Station>,
    by_id: HashMap<String, usize>,
}

impl StationIndex {
    /// Build an index. The first station seen for a code wins.
    pub fn from_stations(stations: impl IntoIterator<Item = Station>) -> Self {
        let mut index = Self::default();
        for station in stations {
            if index.by_id.contains_key(station.id.as_str()) {
                debug!(id = %station.id, "Duplicate station code ignored");
                continue;
            }
            index
                .by_id
                .insert(station.id.as_str().to_string(), index.stations.len());
            index.stations.push(station);
        }
        index
    }

    /// Build an index from raw station records, skipping unusable ones.
    pub fn from_raw(raw: &[RawStation]) -> Self {
        Self::from_stations(raw.iter().filter_map(|record| match convert_station(record) {
            Ok(station) => Some(station),
            Err(e) => {
                warn!(error = %e, "Skipping station record");
                None
            }
        }))
    }

    /// Look up a station by code.
    pub fn get(&self, id: &str) -> Option<&Station> {
        self.by_id.get(id).map(|&i| &self.stations[i])
    }

    /// Look up a station by validated code.
    pub fn station(&self, id: &StationId) -> Option<&Station> {
        self.get(id.as_str())
    }

    /// Resolve a caller reference to a loaded station.
    pub fn resolve(&self, reference: &StationRef) -> Result<&Station, StationError> {
        let id = reference.station_id()?;
        self.station(&id).ok_or_else(|| StationError::UnknownStation {
            id: id.as_str().to_string(),
        })
    }

    /// All stations, in upstream order.
    pub fn all(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Fetch the station list once and index it.
pub async fn load_index<A: KorailApi>(api: &A) -> Result<StationIndex, StationError> {
    let raw = api.fetch_stations().await?;
    let index = StationIndex::from_raw(&raw);
    debug!(
        fetched = raw.len(),
        indexed = index.len(),
        "Loaded station list"
    );
    Ok(index)
}

/// Lazily loaded, shareable station list.
///
/// The first caller triggers the fetch; concurrent callers wait for it and
/// share the result. Readers get an `Arc` snapshot, so a refresh never
/// disturbs a search already in progress.
#[derive(Debug, Default)]
pub struct StationDirectory {
    current: RwLock<Option<Arc<StationIndex>>>,
    loading: Mutex<()>,
}

impl StationDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory that starts out loaded.
    pub fn with_index(index: StationIndex) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(index))),
            loading: Mutex::new(()),
        }
    }

    async fn cached(&self) -> Option<Arc<StationIndex>> {
        self.current.read().await.clone()
    }

    /// The current station list, fetching it on first use.
    pub async fn snapshot<A: KorailApi>(&self, api: &A) -> Result<Arc<StationIndex>, StationError> {
        if let Some(index) = self.cached().await {
            return Ok(index);
        }

        let _loading = self.loading.lock().await;
        // Another caller may have finished loading while we waited.
        if let Some(index) = self.cached().await {
            return Ok(index);
        }

        let index = Arc::new(load_index(api).await?);
        *self.current.write().await = Some(Arc::clone(&index));
        Ok(index)
    }

    /// Refetch the station list.
    ///
    /// On success, replaces the current list. On failure, the existing
    /// list is preserved and the error is returned.
    pub async fn refresh<A: KorailApi>(&self, api: &A) -> Result<usize, StationError> {
        let _loading = self.loading.lock().await;
        let index = load_index(api).await?;
        let count = index.len();

        *self.current.write().await = Some(Arc::new(index));
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockKorailApi;
    use crate::api::fixtures::stations;

    const STATIONS: &str = include_str!("../../data/fixtures/stationdata.json");

    fn api() -> MockKorailApi {
        MockKorailApi::new().with_station_list(STATIONS).unwrap()
    }

    #[test]
    fn resolve_by_code() {
        let index = stations();
        let seoul = index.resolve(&StationRef::from("0001")).unwrap();
        assert_eq!(seoul.name, "서울");
    }

    #[test]
    fn resolve_unknown() {
        let err = stations().resolve(&StationRef::from("9999")).unwrap_err();
        assert!(matches!(err, StationError::UnknownStation { ref id } if id == "9999"));
    }

    #[test]
    fn resolve_empty_is_invalid() {
        let err = stations().resolve(&StationRef::from("")).unwrap_err();
        assert!(matches!(err, StationError::InvalidReference { .. }));
    }

    #[test]
    fn bad_records_are_skipped() {
        let mut raw = serde_json::from_str::<crate::api::StationListResponse>(STATIONS)
            .unwrap()
            .stns
            .stn;
        let mut broken = raw[0].clone();
        broken.stn_cd = " ".into();
        raw.push(broken);

        let index = StationIndex::from_raw(&raw);
        assert_eq!(index.len(), 6);
        assert_eq!(index.all()[0].id.as_str(), "0001");
    }

    #[test]
    fn duplicate_codes_keep_first() {
        let mut dup = stations().all()[0].clone();
        dup.name = "중복".into();
        let index = StationIndex::from_stations(stations().all().iter().cloned().chain([dup]));
        assert_eq!(index.get("0001").unwrap().name, "서울");
        assert_eq!(index.len(), stations().len());
    }

    #[tokio::test]
    async fn snapshot_fetches_once() {
        let api = api();
        let directory = StationDirectory::new();

        let first = directory.snapshot(&api).await.unwrap();
        let second = directory.snapshot(&api).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(api.station_fetches(), 1);
    }

    #[tokio::test]
    async fn concurrent_first_callers_share_fetch() {
        let api = api();
        let directory = StationDirectory::new();

        let (a, b) = tokio::join!(directory.snapshot(&api), directory.snapshot(&api));
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(api.station_fetches(), 1);
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot() {
        let api = api();
        let directory = StationDirectory::new();

        let before = directory.snapshot(&api).await.unwrap();
        let count = directory.refresh(&api).await.unwrap();
        let after = directory.snapshot(&api).await.unwrap();

        assert_eq!(count, 6);
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(api.station_fetches(), 2);
    }

    #[tokio::test]
    async fn preloaded_directory_never_fetches() {
        let api = api();
        let directory = StationDirectory::with_index(stations());
        let index = directory.snapshot(&api).await.unwrap();
        assert_eq!(index.len(), 5);
        assert_eq!(api.station_fetches(), 0);
    }
}
