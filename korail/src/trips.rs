//! Single-trip schedule lookup.

use tracing::debug;

use crate::api::{ConversionError, KorailApi, KorailError, convert_stopover};
use crate::domain::{InvalidTripId, Stopover, TripId};

/// Error from a trip schedule lookup.
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    #[error(transparent)]
    InvalidTripId(#[from] InvalidTripId),

    #[error(transparent)]
    Upstream(#[from] KorailError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// All stops of one train run, in running order.
///
/// `trip_id` is a leg's `tripId` (`lineId###YYYYMMDD`). The first stop has
/// no arrival and the last stop no departure.
pub async fn trip_stopovers<A: KorailApi>(api: &A, trip_id: &str) -> Result<Vec<Stopover>, TripError> {
    let trip = TripId::parse(trip_id)?;
    let raw = api.train_schedule(&trip).await?;
    debug!(%trip, stops = raw.len(), "Fetched train schedule");

    Ok(raw
        .iter()
        .map(convert_stopover)
        .collect::<Result<Vec<_>, _>>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockKorailApi, ScheduleResponse};

    fn api() -> MockKorailApi {
        let stops = ScheduleResponse::from_body(
            serde_json::from_str(include_str!("../data/fixtures/train_schedule.json")).unwrap(),
        )
        .unwrap();
        MockKorailApi::new().with_schedule(&TripId::parse("101###20240315").unwrap(), stops)
    }

    #[tokio::test]
    async fn stopovers_for_trip() {
        let stops = trip_stopovers(&api(), "101###20240315").await.unwrap();

        assert_eq!(stops.len(), 5);
        assert_eq!(stops[0].station.name, "서울");
        assert_eq!(stops[0].arrival, None);
        assert_eq!(stops[4].departure, None);
        assert!(stops[1..4].iter().all(Stopover::is_intermediate));
    }

    #[tokio::test]
    async fn malformed_trip_id() {
        for id in ["101", "101###2024", "###20240315", "101###20241340"] {
            let err = trip_stopovers(&api(), id).await.unwrap_err();
            assert!(matches!(err, TripError::InvalidTripId(_)), "{id}");
        }
    }

    #[tokio::test]
    async fn unknown_trip_is_upstream_error() {
        let err = trip_stopovers(&api(), "101###20240316").await.unwrap_err();
        assert!(matches!(err, TripError::Upstream(_)));
    }
}
