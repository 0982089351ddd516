//! Korail API response DTOs.
//!
//! These types map directly to the Korail mobile API's JSON responses.
//! Field names are Korail's own and are kept verbatim. Korail is loose
//! about scalar types (codes and coordinates arrive as strings or numbers),
//! so those fields go through the lenient deserializers at the bottom of
//! this file.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::KorailError;

/// `strResult` value for a successful call.
pub const RESULT_SUCCESS: &str = "SUCC";

/// `strResult` value for a failed call.
pub const RESULT_FAILURE: &str = "FAIL";

/// Failure code meaning "no trains match the query".
pub const NO_RESULTS: &str = "WRG000000";

/// Failure code meaning "no direct trains between these stations".
pub const NO_DIRECT_CONNECTIONS: &str = "WRD000061";

/// Response from the station list endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationListResponse {
    pub stns: StationList,
}

/// Wrapper around the station records.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationList {
    pub stn: Vec<RawStation>,
}

/// One station record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawStation {
    /// Station code.
    #[serde(deserialize_with = "string_or_number")]
    pub stn_cd: String,

    /// Station name (Korean).
    pub stn_nm: String,

    #[serde(deserialize_with = "f64_or_string")]
    pub longitude: f64,

    #[serde(deserialize_with = "f64_or_string")]
    pub latitude: f64,

    /// Regional group code.
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub group: Option<String>,

    /// Major-station flag. Korail sends booleans, `"Y"`/`"N"` or `1`/`0`.
    #[serde(default, deserialize_with = "opt_flag")]
    pub major: Option<bool>,
}

/// Response from the journey schedule endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JourneyResponse {
    #[serde(rename = "strResult")]
    pub str_result: String,

    /// Message code, set on failures.
    #[serde(default)]
    pub h_msg_cd: Option<String>,

    /// Human-readable message, set on failures.
    #[serde(default)]
    pub h_msg_txt: Option<String>,

    /// Train legs, absent on failures.
    #[serde(default)]
    pub trn_infos: Option<TrainInfos>,
}

/// Wrapper around the raw legs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainInfos {
    #[serde(default)]
    pub trn_info: Vec<RawLeg>,
}

/// One raw leg record.
///
/// Legs of the same journey share `h_trn_seq`; `h_chg_trn_seq` orders them
/// within the journey.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawLeg {
    /// Journey grouping key.
    #[serde(deserialize_with = "string_or_number")]
    pub h_trn_seq: String,

    /// Position of this leg within its journey.
    #[serde(deserialize_with = "string_or_number")]
    pub h_chg_trn_seq: String,

    /// Number of trains Korail declares for this journey.
    #[serde(deserialize_with = "string_or_number")]
    pub h_chg_trn_dv_cd: String,

    /// Departure station code.
    #[serde(deserialize_with = "string_or_number")]
    pub h_dpt_rs_stn_cd: String,

    /// Arrival station code.
    #[serde(deserialize_with = "string_or_number")]
    pub h_arv_rs_stn_cd: String,

    /// Departure date, `YYYYMMDD`.
    pub h_dpt_dt: String,

    /// Departure time, `HHmmss`.
    pub h_dpt_tm: String,

    /// Arrival date, `YYYYMMDD`.
    pub h_arv_dt: String,

    /// Arrival time, `HHmmss`.
    pub h_arv_tm: String,

    /// Train number.
    #[serde(deserialize_with = "string_or_number")]
    pub h_trn_no: String,

    /// Train class name, e.g. `"KTX-산천"`.
    pub h_trn_clsf_nm: String,

    /// Product code, e.g. `"100"`.
    #[serde(deserialize_with = "string_or_number")]
    pub h_trn_gp_cd: String,

    /// Product name, e.g. `"KTX"`.
    pub h_trn_gp_nm: String,

    /// Fare in won, zero-padded.
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub h_rcvd_amt: Option<String>,
}

/// Response from the train schedule endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleResponse {
    #[serde(rename = "strResult")]
    pub str_result: String,

    #[serde(default)]
    pub h_msg_cd: Option<String>,

    #[serde(default)]
    pub h_msg_txt: Option<String>,

    #[serde(default)]
    pub time_infos: Option<TimeInfos>,
}

/// Wrapper around the raw stopovers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimeInfos {
    #[serde(default)]
    pub time_info: Vec<RawStopover>,
}

/// One stop on a train's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawStopover {
    #[serde(deserialize_with = "string_or_number")]
    pub h_stop_rs_stn_cd: String,

    pub h_stop_rs_stn_nm: String,

    #[serde(default)]
    pub h_arv_dt: String,

    /// `"999999"` at the first stop.
    pub h_arv_tm: String,

    #[serde(default)]
    pub h_dpt_dt: String,

    /// `"999999"` at the last stop.
    pub h_dpt_tm: String,
}

/// Decode a response body already parsed as JSON.
pub fn decode<T: DeserializeOwned>(raw: &Value) -> Result<T, KorailError> {
    T::deserialize(raw).map_err(|e| KorailError::Json {
        message: e.to_string(),
        body: Some(raw.to_string().chars().take(500).collect()),
    })
}

impl JourneyResponse {
    /// Decode a schedule search body and interpret its status.
    pub fn from_body(raw: Value) -> Result<Vec<RawLeg>, KorailError> {
        decode::<Self>(&raw)?.into_legs(raw)
    }

    /// Interpret the response status.
    ///
    /// The two "nothing found" failure codes mean zero legs for this
    /// anchor, not an error. Any other failure is surfaced with `raw`,
    /// the body this response was decoded from, attached.
    pub fn into_legs(self, raw: Value) -> Result<Vec<RawLeg>, KorailError> {
        if self.is_empty_result() {
            return Ok(Vec::new());
        }

        if self.str_result != RESULT_SUCCESS {
            return Err(KorailError::upstream(self.h_msg_cd, self.h_msg_txt, raw));
        }

        Ok(self.trn_infos.map(|t| t.trn_info).unwrap_or_default())
    }

    /// True if this is one of the "nothing found" failures.
    pub fn is_empty_result(&self) -> bool {
        self.str_result == RESULT_FAILURE
            && matches!(
                self.h_msg_cd.as_deref(),
                Some(NO_RESULTS) | Some(NO_DIRECT_CONNECTIONS)
            )
    }
}

impl ScheduleResponse {
    /// Decode a train schedule body and interpret its status.
    pub fn from_body(raw: Value) -> Result<Vec<RawStopover>, KorailError> {
        decode::<Self>(&raw)?.into_stopovers(raw)
    }

    /// Interpret the response status. Every failure is an error here.
    pub fn into_stopovers(self, raw: Value) -> Result<Vec<RawStopover>, KorailError> {
        if self.str_result != RESULT_SUCCESS {
            return Err(KorailError::upstream(self.h_msg_cd, self.h_msg_txt, raw));
        }
        Ok(self.time_infos.map(|t| t.time_info).unwrap_or_default())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Str(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Scalar::deserialize(d).map(Scalar::into_string)
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(d)?.map(Scalar::into_string))
}

fn f64_or_string<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    match Scalar::deserialize(d)? {
        Scalar::Float(n) => Ok(n),
        Scalar::Int(n) => Ok(n as f64),
        Scalar::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got {s:?}"))),
        Scalar::Bool(b) => Err(serde::de::Error::custom(format!(
            "expected a number, got {b}"
        ))),
    }
}

fn opt_flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    let flag = match Option::<Scalar>::deserialize(d)? {
        None => None,
        Some(Scalar::Bool(b)) => Some(b),
        Some(Scalar::Int(n)) => Some(n != 0),
        Some(Scalar::Float(n)) => Some(n != 0.0),
        Some(Scalar::Str(s)) => match s.trim() {
            "" => None,
            "Y" | "y" | "1" | "true" => Some(true),
            _ => Some(false),
        },
    };
    Ok(flag)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIONS: &str = include_str!("../../data/fixtures/stationdata.json");
    const SCHEDULE_VIEW: &str = include_str!("../../data/fixtures/schedule_view.json");
    const TRAIN_SCHEDULE: &str = include_str!("../../data/fixtures/train_schedule.json");

    #[test]
    fn parse_station_list() {
        let response: StationListResponse = serde_json::from_str(STATIONS).unwrap();
        let stations = response.stns.stn;
        assert!(stations.len() >= 4);

        let seoul = stations.iter().find(|s| s.stn_cd == "0001").unwrap();
        assert_eq!(seoul.stn_nm, "서울");
        assert!(seoul.longitude > 100.0);
        assert_eq!(seoul.major, Some(true));
    }

    #[test]
    fn lenient_scalars() {
        let json = r#"{"stn_cd": 15, "stn_nm": "대전", "longitude": "127.4348", "latitude": 36.3321, "group": 3, "major": "N"}"#;
        let station: RawStation = serde_json::from_str(json).unwrap();
        assert_eq!(station.stn_cd, "15");
        assert_eq!(station.group.as_deref(), Some("3"));
        assert!((station.longitude - 127.4348).abs() < 1e-9);
        assert_eq!(station.major, Some(false));
    }

    #[test]
    fn missing_major_is_none() {
        let json = r#"{"stn_cd": "0041", "stn_nm": "목포", "longitude": 126.38, "latitude": 34.79}"#;
        let station: RawStation = serde_json::from_str(json).unwrap();
        assert_eq!(station.major, None);
        assert_eq!(station.group, None);
    }

    #[test]
    fn parse_schedule_view() {
        let legs = JourneyResponse::from_body(serde_json::from_str(SCHEDULE_VIEW).unwrap()).unwrap();
        assert!(!legs.is_empty());
        assert!(legs.iter().all(|l| l.h_dpt_tm.len() == 6));
    }

    #[test]
    fn parse_train_schedule() {
        let stops = ScheduleResponse::from_body(serde_json::from_str(TRAIN_SCHEDULE).unwrap()).unwrap();
        assert_eq!(stops.first().unwrap().h_arv_tm, "999999");
        assert_eq!(stops.last().unwrap().h_dpt_tm, "999999");
    }

    #[test]
    fn no_results_sentinels_are_empty() {
        for code in [NO_RESULTS, NO_DIRECT_CONNECTIONS] {
            let json = format!(r#"{{"strResult": "FAIL", "h_msg_cd": "{code}", "h_msg_txt": "..."}}"#);
            let raw: Value = serde_json::from_str(&json).unwrap();
            assert!(decode::<JourneyResponse>(&raw).unwrap().is_empty_result());
            assert_eq!(JourneyResponse::from_body(raw).unwrap(), vec![]);
        }
    }

    #[test]
    fn other_failures_are_upstream_errors() {
        let json = r#"{"strResult": "FAIL", "h_msg_cd": "ERR000001", "h_msg_txt": "boom"}"#;
        let err = JourneyResponse::from_body(serde_json::from_str(json).unwrap()).unwrap_err();
        match err {
            KorailError::Upstream { code, raw, .. } => {
                assert_eq!(code.as_deref(), Some("ERR000001"));
                assert_eq!(raw["h_msg_txt"], "boom");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn schedule_failure_is_error() {
        let json = r#"{"strResult": "FAIL", "h_msg_cd": "WRG000000"}"#;
        assert!(ScheduleResponse::from_body(serde_json::from_str(json).unwrap()).is_err());
    }

    #[test]
    fn upstream_error_keeps_unmodelled_fields() {
        let raw = serde_json::json!({
            "strResult": "FAIL",
            "h_msg_cd": "ERR000001",
            "h_msg_txt": "boom",
            "h_err_detail": "seat db offline",
            "trn_infos": {"trn_info": [], "h_page_no": 3},
        });

        match JourneyResponse::from_body(raw.clone()).unwrap_err() {
            KorailError::Upstream { raw: attached, .. } => assert_eq!(attached, raw),
            other => panic!("expected upstream error, got {other:?}"),
        }

        let schedule = serde_json::json!({
            "strResult": "FAIL",
            "h_msg_cd": "ERR000002",
            "h_err_detail": "train not running",
        });
        match ScheduleResponse::from_body(schedule.clone()).unwrap_err() {
            KorailError::Upstream { raw: attached, .. } => assert_eq!(attached, schedule),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn undecodable_body_is_json_error() {
        let raw = serde_json::json!({"h_msg_cd": "ERR000001"});
        let err = JourneyResponse::from_body(raw).unwrap_err();
        assert!(matches!(err, KorailError::Json { body: Some(_), .. }));
    }
}
