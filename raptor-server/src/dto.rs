//! Wire types returned by the HTTP API, and their conversions from
//! `raptor-core`'s internal `Journey`/`JourneyLeg`.
//!
//! Kept deliberately separate from the engine's own types: the engine
//! speaks seconds-into-service-day, the wire format speaks absolute Unix
//! timestamps, and a JSON consumer shouldn't have to know the difference.

use raptor_core::{Journey, JourneyLeg, SearchMeta};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat: f64,
    pub to_lon: f64,
    /// Departure time as Unix epoch seconds.
    pub departure: i64,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub journeys: Vec<JourneyDto>,
    pub access_stop_count: usize,
    pub egress_stop_count: usize,
    pub rounds_run: usize,
}

#[derive(Debug, Serialize)]
pub struct JourneyDto {
    pub departure_time: i64,
    pub arrival_time: i64,
    pub transfer_count: usize,
    pub walking_seconds: u32,
    pub legs: Vec<JourneyLegDto>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JourneyLegDto {
    Walk {
        from_stop: String,
        to_stop: String,
        from_time: i64,
        to_time: i64,
    },
    Ride {
        from_stop: String,
        to_stop: String,
        from_time: i64,
        to_time: i64,
        route_id: String,
        trip_id: String,
    },
}

impl JourneyDto {
    pub fn from_journey(journey: &Journey, meta: &SearchMeta) -> Self {
        let epoch = |t: u32| meta.service_day_epoch_seconds + i64::from(t);
        Self {
            departure_time: epoch(journey.departure_time),
            arrival_time: epoch(journey.arrival_time),
            transfer_count: journey.transfer_count,
            walking_seconds: journey.walking_seconds,
            legs: journey
                .legs
                .iter()
                .map(|leg| JourneyLegDto::from_leg(leg, meta))
                .collect(),
        }
    }
}

impl JourneyLegDto {
    fn from_leg(leg: &JourneyLeg, meta: &SearchMeta) -> Self {
        let epoch = |t: u32| meta.service_day_epoch_seconds + i64::from(t);
        match leg {
            JourneyLeg::Walk { from_stop, to_stop, from_time, to_time } => JourneyLegDto::Walk {
                from_stop: from_stop.clone(),
                to_stop: to_stop.clone(),
                from_time: epoch(*from_time),
                to_time: epoch(*to_time),
            },
            JourneyLeg::Ride {
                from_stop,
                to_stop,
                from_time,
                to_time,
                route_id,
                trip_id,
                ..
            } => JourneyLegDto::Ride {
                from_stop: from_stop.clone(),
                to_stop: to_stop.clone(),
                from_time: epoch(*from_time),
                to_time: epoch(*to_time),
                route_id: route_id.clone(),
                trip_id: trip_id.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
