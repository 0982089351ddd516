//! Conversion from Korail DTOs to domain types.
//!
//! Korail returns one flat list of legs per query. Legs sharing a
//! `h_trn_seq` form one journey, ordered by `h_chg_trn_seq`. Anything that
//! breaks those assumptions is an upstream contract violation and is
//! surfaced as an error rather than skipped.

use std::collections::HashMap;

use crate::domain::{
    Journey, Leg, Line, LineProduct, Location, Price, Station, StationId, StationStub, Stopover,
    TimeError, parse_instant, parse_optional_instant,
};
use crate::stations::StationIndex;

use super::types::{RawLeg, RawStation, RawStopover};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A leg record could not be turned into a leg
    #[error("malformed leg on train {train}: {reason}")]
    MalformedLeg { train: String, reason: String },

    /// A journey's leg count disagrees with the declared transfer count
    #[error(
        "inconsistent leg group {sequence}: upstream declares {declared:?} trains but sent {actual} legs"
    )]
    InconsistentLegGroup {
        sequence: String,
        declared: String,
        actual: usize,
    },

    /// A station record could not be turned into a station
    #[error("invalid station record {code:?}: {reason}")]
    InvalidStation { code: String, reason: String },

    /// A stopover time could not be parsed
    #[error("invalid time at stop {station}: {source}")]
    InvalidTime {
        station: String,
        #[source]
        source: TimeError,
    },
}

impl ConversionError {
    fn malformed(raw: &RawLeg, reason: impl Into<String>) -> Self {
        ConversionError::MalformedLeg {
            train: raw.h_trn_no.clone(),
            reason: reason.into(),
        }
    }
}

/// Convert one station record.
pub fn convert_station(raw: &RawStation) -> Result<Station, ConversionError> {
    let id = StationId::parse(&raw.stn_cd).map_err(|e| ConversionError::InvalidStation {
        code: raw.stn_cd.clone(),
        reason: e.to_string(),
    })?;

    Ok(Station {
        id,
        name: raw.stn_nm.trim().to_string(),
        location: Location {
            longitude: raw.longitude,
            latitude: raw.latitude,
        },
        group: raw.group.clone().unwrap_or_default(),
        major: raw.major.filter(|&major| major),
    })
}

/// Group a raw batch into per-journey leg lists.
///
/// Groups keep the order in which Korail first mentions them; legs within
/// a group are sorted by their change sequence.
pub fn group_legs(raw: Vec<RawLeg>) -> Result<Vec<Vec<RawLeg>>, ConversionError> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<(u32, RawLeg)>> = Vec::new();

    for leg in raw {
        let position: u32 = leg.h_chg_trn_seq.trim().parse().map_err(|_| {
            ConversionError::malformed(
                &leg,
                format!("change sequence {:?} is not a number", leg.h_chg_trn_seq),
            )
        })?;

        let slot = *index.entry(leg.h_trn_seq.clone()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push((position, leg));
    }

    Ok(groups
        .into_iter()
        .map(|mut group| {
            group.sort_by_key(|(position, _)| *position);
            group.into_iter().map(|(_, leg)| leg).collect()
        })
        .collect())
}

/// Convert one raw leg, resolving its stations against `stations`.
pub fn convert_leg(raw: &RawLeg, stations: &StationIndex) -> Result<Leg, ConversionError> {
    let origin = stations.get(raw.h_dpt_rs_stn_cd.trim()).ok_or_else(|| {
        ConversionError::malformed(raw, format!("unknown origin {:?}", raw.h_dpt_rs_stn_cd))
    })?;
    let destination = stations.get(raw.h_arv_rs_stn_cd.trim()).ok_or_else(|| {
        ConversionError::malformed(
            raw,
            format!("unknown destination {:?}", raw.h_arv_rs_stn_cd),
        )
    })?;

    let departure = parse_instant(&raw.h_dpt_dt, &raw.h_dpt_tm)
        .map_err(|e| ConversionError::malformed(raw, format!("departure: {e}")))?;
    let arrival = parse_instant(&raw.h_arv_dt, &raw.h_arv_tm)
        .map_err(|e| ConversionError::malformed(raw, format!("arrival: {e}")))?;

    let number = raw.h_trn_no.trim();
    let line = Line::new(
        number,
        format!("{} {}", raw.h_trn_clsf_nm.trim(), number),
        LineProduct {
            id: raw.h_trn_gp_cd.trim().to_string(),
            name: raw.h_trn_gp_nm.trim().to_string(),
        },
    );

    Leg::new(origin.clone(), destination.clone(), departure, arrival, line)
        .map_err(|e| ConversionError::malformed(raw, e.to_string()))
}

/// Convert one leg group (already sorted) into a journey.
///
/// The group must hold exactly as many legs as Korail declares trains for
/// it, i.e. declared transfers + 1.
pub fn convert_journey(group: &[RawLeg], stations: &StationIndex) -> Result<Journey, ConversionError> {
    let Some(first) = group.first() else {
        return Err(ConversionError::InconsistentLegGroup {
            sequence: String::new(),
            declared: String::new(),
            actual: 0,
        });
    };

    let inconsistent = || ConversionError::InconsistentLegGroup {
        sequence: first.h_trn_seq.clone(),
        declared: first.h_chg_trn_dv_cd.clone(),
        actual: group.len(),
    };

    let declared_trains: usize = first
        .h_chg_trn_dv_cd
        .trim()
        .parse()
        .map_err(|_| inconsistent())?;
    let declared_transfers = declared_trains.checked_sub(1).ok_or_else(inconsistent)?;
    if group.len() != declared_transfers + 1 {
        return Err(inconsistent());
    }

    let legs = group
        .iter()
        .map(|raw| convert_leg(raw, stations))
        .collect::<Result<Vec<_>, _>>()?;

    let price = if legs.len() == 1 {
        parse_price(first.h_rcvd_amt.as_deref())
    } else {
        None
    };

    Journey::new(legs, price).map_err(|e| ConversionError::malformed(first, e.to_string()))
}

/// Group and convert a whole raw batch.
pub fn convert_batch(
    raw: Vec<RawLeg>,
    stations: &StationIndex,
) -> Result<Vec<Journey>, ConversionError> {
    group_legs(raw)?
        .iter()
        .map(|group| convert_journey(group, stations))
        .collect()
}

/// Convert one stop of a train schedule.
pub fn convert_stopover(raw: &RawStopover) -> Result<Stopover, ConversionError> {
    let invalid_time = |source| ConversionError::InvalidTime {
        station: raw.h_stop_rs_stn_cd.clone(),
        source,
    };

    let id = StationId::parse(&raw.h_stop_rs_stn_cd).map_err(|e| {
        ConversionError::InvalidStation {
            code: raw.h_stop_rs_stn_cd.clone(),
            reason: e.to_string(),
        }
    })?;

    Ok(Stopover {
        station: StationStub {
            id,
            name: raw.h_stop_rs_stn_nm.trim().to_string(),
        },
        arrival: parse_optional_instant(&raw.h_arv_dt, &raw.h_arv_tm).map_err(invalid_time)?,
        departure: parse_optional_instant(&raw.h_dpt_dt, &raw.h_dpt_tm).map_err(invalid_time)?,
    })
}

/// A positive fare, if Korail quoted one.
fn parse_price(amount: Option<&str>) -> Option<Price> {
    let amount: u64 = amount?.trim().parse().ok()?;
    (amount > 0).then(|| Price::krw(amount))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Station index for the stations used across the adapter's tests.
    pub fn stations() -> StationIndex {
        let raw = [
            ("0001", "서울", 126.970_609, 37.554_648),
            ("0010", "대전", 127.434_800, 36.332_100),
            ("0015", "동대구", 128.628_500, 35.879_600),
            ("0020", "부산", 129.041_600, 35.115_300),
            ("0041", "목포", 126.386_400, 34.791_200),
        ];
        StationIndex::from_stations(raw.iter().map(|(id, name, lon, lat)| Station {
            id: StationId::parse(id).unwrap(),
            name: (*name).to_string(),
            location: Location {
                longitude: *lon,
                latitude: *lat,
            },
            group: "1".into(),
            major: Some(true),
        }))
    }

    /// A raw leg on 2024-03-15 with the given grouping fields.
    #[allow(clippy::too_many_arguments)]
    pub fn raw_leg(
        seq: &str,
        chg_seq: &str,
        trains: &str,
        from: &str,
        to: &str,
        dep: &str,
        arr: &str,
        number: &str,
    ) -> RawLeg {
        RawLeg {
            h_trn_seq: seq.into(),
            h_chg_trn_seq: chg_seq.into(),
            h_chg_trn_dv_cd: trains.into(),
            h_dpt_rs_stn_cd: from.into(),
            h_arv_rs_stn_cd: to.into(),
            h_dpt_dt: "20240315".into(),
            h_dpt_tm: dep.into(),
            h_arv_dt: "20240315".into(),
            h_arv_tm: arr.into(),
            h_trn_no: number.into(),
            h_trn_clsf_nm: "KTX".into(),
            h_trn_gp_cd: "100".into(),
            h_trn_gp_nm: "KTX".into(),
            h_rcvd_amt: Some("0000000059800".into()),
        }
    }
}
