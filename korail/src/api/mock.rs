//! Scripted Korail API for testing without network access.
//!
//! Serves a fixed station list, a timetable of raw legs and per-train
//! schedules, answering anchored queries the way Korail does: one page of
//! journeys departing at or after the anchor, legs in no particular order.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;

use crate::domain::TripId;

use super::error::KorailError;
use super::provider::{JourneyQuery, KorailApi};
use super::types::{
    JourneyResponse, NO_DIRECT_CONNECTIONS, NO_RESULTS, RESULT_FAILURE, RawLeg, RawStation,
    RawStopover, ScheduleResponse, StationListResponse, decode,
};

/// Journeys Korail returns per query.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Scripted stand-in for [`KorailClient`](super::KorailClient).
///
/// The timetable is assumed to serve whatever origin and destination are
/// queried; only the anchor, routing and product filters are applied.
pub struct MockKorailApi {
    stations: Vec<RawStation>,
    timetable: Vec<RawLeg>,
    schedules: HashMap<(String, String), Vec<RawStopover>>,
    page_size: usize,
    latency: Option<Duration>,
    failure: Option<Value>,
    queries: Mutex<Vec<JourneyQuery>>,
    station_fetches: Mutex<usize>,
}

impl MockKorailApi {
    pub fn new() -> Self {
        Self {
            stations: Vec::new(),
            timetable: Vec::new(),
            schedules: HashMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
            latency: None,
            failure: None,
            queries: Mutex::new(Vec::new()),
            station_fetches: Mutex::new(0),
        }
    }

    /// Serve the given station records.
    pub fn with_stations(mut self, stations: Vec<RawStation>) -> Self {
        self.stations = stations;
        self
    }

    /// Serve the station records from a station list response body.
    pub fn with_station_list(self, json: &str) -> Result<Self, KorailError> {
        let raw: Value = serde_json::from_str(json).map_err(|e| KorailError::Json {
            message: e.to_string(),
            body: None,
        })?;
        let response: StationListResponse = decode(&raw)?;
        Ok(self.with_stations(response.stns.stn))
    }

    /// Add legs to the timetable. Legs are grouped by `h_trn_seq`.
    pub fn with_legs(mut self, legs: impl IntoIterator<Item = RawLeg>) -> Self {
        self.timetable.extend(legs);
        self
    }

    /// Serve a schedule for one train run.
    pub fn with_schedule(mut self, trip: &TripId, stops: Vec<RawStopover>) -> Self {
        self.schedules
            .insert((trip.line_id().to_string(), trip.service_day()), stops);
        self
    }

    /// Number of journeys returned per query.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Take this long to answer each journey query.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Answer every journey query with the given failure.
    pub fn failing_with(mut self, code: &str, message: &str) -> Self {
        self.failure = Some(failure(code, message));
        self
    }

    /// Journey queries received so far, in order.
    pub fn queries(&self) -> Vec<JourneyQuery> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }

    /// Number of journey queries received so far.
    pub fn query_count(&self) -> usize {
        self.queries.lock().map(|q| q.len()).unwrap_or_default()
    }

    /// Number of station list fetches so far.
    pub fn station_fetches(&self) -> usize {
        self.station_fetches.lock().map(|n| *n).unwrap_or_default()
    }

    /// Journeys in timetable order, each with its departure key.
    fn journeys(&self) -> Vec<((&str, &str), Vec<&RawLeg>)> {
        let mut order: Vec<&str> = Vec::new();
        let mut groups: HashMap<&str, Vec<&RawLeg>> = HashMap::new();
        for leg in &self.timetable {
            let legs = groups.entry(leg.h_trn_seq.as_str()).or_default();
            if legs.is_empty() {
                order.push(leg.h_trn_seq.as_str());
            }
            legs.push(leg);
        }

        order
            .into_iter()
            .filter_map(|seq| groups.remove(seq))
            .filter_map(|legs| {
                let departs = legs
                    .iter()
                    .map(|l| (l.h_dpt_dt.as_str(), l.h_dpt_tm.as_str()))
                    .min()?;
                Some((departs, legs))
            })
            .collect()
    }

    fn answer(&self, query: &JourneyQuery) -> Vec<RawLeg> {
        let day = query.day();
        let time = query.time();
        let product = query.product.map(|p| p.code());

        let mut matching: Vec<_> = self
            .journeys()
            .into_iter()
            .filter(|(departs, _)| *departs >= (day.as_str(), time.as_str()))
            .filter(|(_, legs)| !query.direct || legs.len() == 1)
            .filter(|(_, legs)| {
                product.is_none_or(|code| legs.iter().all(|l| l.h_trn_gp_cd == code))
            })
            .collect();
        matching.sort_by_key(|(departs, _)| *departs);

        // Korail makes no promise about leg order within a page.
        let mut legs: Vec<RawLeg> = matching
            .into_iter()
            .take(self.page_size)
            .flat_map(|(_, legs)| legs.into_iter().cloned())
            .collect();
        legs.reverse();
        legs
    }
}

impl Default for MockKorailApi {
    fn default() -> Self {
        Self::new()
    }
}

fn failure(code: &str, message: &str) -> Value {
    serde_json::json!({
        "strResult": RESULT_FAILURE,
        "h_msg_cd": code,
        "h_msg_txt": message,
    })
}

impl KorailApi for MockKorailApi {
    async fn fetch_stations(&self) -> Result<Vec<RawStation>, KorailError> {
        if let Ok(mut fetches) = self.station_fetches.lock() {
            *fetches += 1;
        }
        Ok(self.stations.clone())
    }

    async fn query_journeys(&self, query: &JourneyQuery) -> Result<Vec<RawLeg>, KorailError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(response) = &self.failure {
            return JourneyResponse::from_body(response.clone());
        }

        let legs = self.answer(query);
        if legs.is_empty() {
            let code = if query.direct {
                NO_DIRECT_CONNECTIONS
            } else {
                NO_RESULTS
            };
            return JourneyResponse::from_body(failure(code, "조회 결과가 없습니다."));
        }
        Ok(legs)
    }

    async fn train_schedule(&self, trip: &TripId) -> Result<Vec<RawStopover>, KorailError> {
        let key = (trip.line_id().to_string(), trip.service_day());
        match self.schedules.get(&key) {
            Some(stops) => Ok(stops.clone()),
            None => {
                let message = format!("no schedule for {trip}");
                ScheduleResponse::from_body(failure(NO_RESULTS, &message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::convert::fixtures::raw_leg;
    use crate::domain::{Product, parse_instant};

    fn query(time: &str, direct: bool) -> JourneyQuery {
        JourneyQuery {
            origin_name: "서울".into(),
            destination_name: "부산".into(),
            anchor: parse_instant("20240315", time).unwrap(),
            product: None,
            direct,
        }
    }

    fn mock() -> MockKorailApi {
        let mut slow = raw_leg("3", "1", "1", "0001", "0020", "090000", "133000", "1003");
        slow.h_trn_gp_cd = "101".into();
        MockKorailApi::new().with_legs([
            raw_leg("1", "1", "1", "0001", "0020", "080000", "104500", "101"),
            raw_leg("2", "1", "2", "0001", "0010", "083000", "093000", "103"),
            raw_leg("2", "2", "2", "0010", "0020", "094000", "112000", "205"),
            slow,
        ])
    }

    #[tokio::test]
    async fn anchor_filters_earlier_journeys() {
        let api = mock();
        let legs = api.query_journeys(&query("081000", false)).await.unwrap();
        let mut seqs: Vec<_> = legs.iter().map(|l| l.h_trn_seq.as_str()).collect();
        seqs.sort();
        assert_eq!(seqs, vec!["2", "2", "3"]);
        assert_eq!(api.query_count(), 1);
    }

    #[tokio::test]
    async fn direct_routing_skips_transfers() {
        let api = mock();
        let legs = api.query_journeys(&query("081000", true)).await.unwrap();
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].h_trn_no, "1003");
    }

    #[tokio::test]
    async fn product_filter() {
        let api = mock();
        let mut q = query("000000", false);
        q.product = Some(Product::Saemaeul);
        let legs = api.query_journeys(&q).await.unwrap();
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].h_trn_gp_cd, "101");
    }

    #[tokio::test]
    async fn page_size_limits_journeys() {
        let api = mock().with_page_size(1);
        let legs = api.query_journeys(&query("000000", false)).await.unwrap();
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].h_trn_no, "101");
    }

    #[tokio::test]
    async fn nothing_after_anchor_is_empty_not_error() {
        let api = mock();
        let legs = api.query_journeys(&query("230000", true)).await.unwrap();
        assert!(legs.is_empty());
    }

    #[tokio::test]
    async fn scripted_failure() {
        let api = mock().failing_with("ERR999999", "down for maintenance");
        let err = api.query_journeys(&query("080000", false)).await.unwrap_err();
        match err {
            KorailError::Upstream { code, raw, .. } => {
                assert_eq!(code.as_deref(), Some("ERR999999"));
                assert_eq!(raw["h_msg_txt"], "down for maintenance");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_schedule_is_error() {
        let api = mock();
        let trip = TripId::parse("101###20240315").unwrap();
        assert!(api.train_schedule(&trip).await.is_err());
    }

    #[tokio::test]
    async fn station_list_from_json() {
        let api = MockKorailApi::new()
            .with_station_list(include_str!("../../data/fixtures/stationdata.json"))
            .unwrap();
        let stations = api.fetch_stations().await.unwrap();
        assert_eq!(stations.len(), 6);
        assert_eq!(api.station_fetches(), 1);
    }
}
