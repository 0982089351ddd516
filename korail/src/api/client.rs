//! Korail mobile API HTTP client.
//!
//! Wraps the three endpoints of Korail's mobile app backend: the station
//! list, the anchored schedule search and the single-train timetable.
//! Query parameter names are Korail's and are sent verbatim.

use serde_json::Value;
use tracing::{debug, trace};

use crate::domain::TripId;

use super::error::KorailError;
use super::provider::{JourneyQuery, KorailApi};
use super::types::{
    JourneyResponse, RawLeg, RawStation, RawStopover, ScheduleResponse, StationListResponse,
    decode,
};

/// Default base URL for the Korail mobile API.
const DEFAULT_BASE_URL: &str = "https://smart.letskorail.com";

/// Static key the mobile app sends with schedule searches.
const DEFAULT_KEY: &str = "korail1234567890";

/// Device type the mobile app identifies as.
const DEFAULT_DEVICE: &str = "IP";

const STATIONS_PATH: &str = "/classes/com.korail.mobile.common.stationdata";
const SCHEDULE_VIEW_PATH: &str = "/classes/com.korail.mobile.seatMovie.ScheduleView";
const TRAIN_SCHEDULE_PATH: &str = "/classes/com.korail.mobile.trainsInfo.TrainSchedule";

/// Configuration for the Korail client.
#[derive(Debug, Clone)]
pub struct KorailConfig {
    /// Base URL for the API (defaults to production Korail)
    pub base_url: String,
    /// Static API key
    pub key: String,
    /// Device identifier
    pub device: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl KorailConfig {
    /// Create a config pointing at production Korail.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            key: DEFAULT_KEY.to_string(),
            device: DEFAULT_DEVICE.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the static key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for KorailConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Korail mobile API client.
#[derive(Debug, Clone)]
pub struct KorailClient {
    http: reqwest::Client,
    config: KorailConfig,
}

impl KorailClient {
    /// Create a new Korail client with the given configuration.
    pub fn new(config: KorailConfig) -> Result<Self, KorailError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Query parameters for an anchored schedule search.
    fn schedule_view_params(&self, query: &JourneyQuery) -> Vec<(&'static str, String)> {
        let product = query.product_code().to_string();
        vec![
            ("Device", self.config.device.clone()),
            ("ebizCrossCheck", "Y".into()),
            ("key", self.config.key.clone()),
            ("radJobId", query.routing_code().into()),
            ("rtYn", "N".into()),
            ("selGoTrain", product.clone()),
            ("srtCheckYn", "Y".into()),
            ("txtCardPsgCnt", "0".into()),
            ("txtGoAbrdDt", query.day()),
            ("txtGoEnd", query.destination_name.clone()),
            ("txtGoHour", query.time()),
            ("txtGoStart", query.origin_name.clone()),
            ("txtPsgFlg_1", "01".into()),
            ("txtPsgFlg_2", "00".into()),
            ("txtPsgFlg_3", "00".into()),
            ("txtPsgFlg_4", "00".into()),
            ("txtPsgFlg_5", "00".into()),
            ("txtSeatAttCd_2", "000".into()),
            ("txtSeatAttCd_3", "000".into()),
            ("txtSeatAttCd_4", "015".into()),
            ("txtTrnGpCd", product),
        ]
    }

    /// Query parameters for a single-train timetable.
    fn train_schedule_params(&self, trip: &TripId) -> Vec<(&'static str, String)> {
        vec![
            ("Device", self.config.device.clone()),
            ("srtCheckYn", "Y".into()),
            ("txtRunDt", trip.service_day()),
            ("txtTrnNo", trip.line_id().to_string()),
        ]
    }

    /// Send a request and parse the body as JSON.
    ///
    /// The body is kept as a [`Value`] so failures can carry it whole.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, KorailError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KorailError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        trace!(bytes = body.len(), "Korail response received");

        serde_json::from_str(&body).map_err(|e| KorailError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl KorailApi for KorailClient {
    async fn fetch_stations(&self) -> Result<Vec<RawStation>, KorailError> {
        let request = self.http.get(self.url(STATIONS_PATH));
        let response: StationListResponse = decode(&self.send(request).await?)?;

        debug!(count = response.stns.stn.len(), "Fetched station list");
        Ok(response.stns.stn)
    }

    async fn query_journeys(&self, query: &JourneyQuery) -> Result<Vec<RawLeg>, KorailError> {
        let request = self
            .http
            .post(self.url(SCHEDULE_VIEW_PATH))
            .query(&self.schedule_view_params(query));
        let raw = self.send(request).await?;
        let response: JourneyResponse = decode(&raw)?;

        if response.is_empty_result() {
            debug!(
                code = response.h_msg_cd.as_deref().unwrap_or_default(),
                anchor = %query.anchor,
                "Korail found no trains for anchor"
            );
        }
        response.into_legs(raw)
    }

    async fn train_schedule(&self, trip: &TripId) -> Result<Vec<RawStopover>, KorailError> {
        let request = self
            .http
            .post(self.url(TRAIN_SCHEDULE_PATH))
            .query(&self.train_schedule_params(trip));
        ScheduleResponse::from_body(self.send(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, parse_instant};

    #[test]
    fn config_builder() {
        let config = KorailConfig::new()
            .with_base_url("http://localhost:8080")
            .with_key("test-key")
            .with_timeout(60);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.key, "test-key");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = KorailConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.key, DEFAULT_KEY);
        assert_eq!(config.device, "IP");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let client = KorailClient::new(KorailConfig::new());
        assert!(client.is_ok());
    }

    #[test]
    fn url_joins_base_and_path() {
        let client =
            KorailClient::new(KorailConfig::new().with_base_url("http://localhost:8080/")).unwrap();
        assert_eq!(
            client.url(STATIONS_PATH),
            "http://localhost:8080/classes/com.korail.mobile.common.stationdata"
        );
    }

    #[test]
    fn schedule_view_params_use_korail_names() {
        let client = KorailClient::new(KorailConfig::new()).unwrap();
        let query = JourneyQuery {
            origin_name: "서울".into(),
            destination_name: "부산".into(),
            anchor: parse_instant("20240315", "080000").unwrap(),
            product: Some(Product::Ktx),
            direct: true,
        };

        let params = client.schedule_view_params(&query);
        let get = |name: &str| {
            params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("txtGoStart"), Some("서울"));
        assert_eq!(get("txtGoEnd"), Some("부산"));
        assert_eq!(get("txtGoAbrdDt"), Some("20240315"));
        assert_eq!(get("txtGoHour"), Some("080000"));
        assert_eq!(get("radJobId"), Some("1"));
        assert_eq!(get("selGoTrain"), Some("100"));
        assert_eq!(get("txtTrnGpCd"), Some("100"));
        assert_eq!(get("key"), Some(DEFAULT_KEY));
        assert_eq!(get("txtSeatAttCd_4"), Some("015"));
    }

    #[test]
    fn train_schedule_params() {
        let client = KorailClient::new(KorailConfig::new()).unwrap();
        let trip = TripId::parse("524###20240315").unwrap();
        let params = client.train_schedule_params(&trip);

        assert!(params.contains(&("txtRunDt", "20240315".to_string())));
        assert!(params.contains(&("txtTrnNo", "524".to_string())));
    }

    // Live requests need network access to Korail and are not run here.
}
