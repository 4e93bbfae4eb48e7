//! Query Orchestrator: the single transport-agnostic entry point.
//!
//! Glue only, per §4.6: validates inputs, resolves access/egress against the
//! shared spatial index, runs the RAPTOR core, reconstructs journeys from
//! every round and egress stop, and Pareto-filters the result. All state
//! beyond the immutable [`TransitModel`] is allocated here and freed on
//! return.

use chrono::DateTime;
use log::debug;

use crate::cancellation::CancellationToken;
use crate::config::SearchOptions;
use crate::error::QueryError;
use crate::journey::{Journey, filter_pareto, reconstruct_all};
use crate::raptor;
use crate::transit_model::TransitModel;
use crate::types::Time;

/// A geographic coordinate, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    fn validate(self, label: &str) -> Result<(), QueryError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(QueryError::InvalidInput(format!(
                "{label} latitude {} out of range",
                self.lat
            )));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(QueryError::InvalidInput(format!(
                "{label} longitude {} out of range",
                self.lon
            )));
        }
        Ok(())
    }
}

/// Diagnostic information about one `search` call, alongside the returned
/// journeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMeta {
    /// Epoch seconds of the UTC midnight the query's `departure_time`'s
    /// seconds-since-service-day-start values are relative to. A caller
    /// wanting absolute timestamps for a journey's legs adds this to every
    /// `Time` field on the returned [`Journey`]s.
    pub service_day_epoch_seconds: i64,
    pub access_stop_count: usize,
    pub egress_stop_count: usize,
    /// Number of RAPTOR rounds actually run before `marked` went empty or
    /// `max_transfers` was reached.
    pub rounds_run: usize,
}

/// The result of a `search` call: a Pareto-optimal set of journeys plus
/// diagnostic metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub journeys: Vec<Journey>,
    pub meta: SearchMeta,
}

/// Runs one journey query with no external cancellation hook beyond
/// `options.timeout_ms`.
pub fn search(
    model: &TransitModel,
    origin: LatLon,
    destination: LatLon,
    departure_time_epoch_seconds: i64,
    options: SearchOptions,
) -> Result<SearchResult, QueryError> {
    search_cancellable(
        model,
        origin,
        destination,
        departure_time_epoch_seconds,
        options,
        &CancellationToken::none(),
    )
}

/// Runs one journey query, combining a caller-supplied [`CancellationToken`]
/// (for example, one tied to an HTTP request's disconnect) with
/// `options.timeout_ms`.
pub fn search_cancellable(
    model: &TransitModel,
    origin: LatLon,
    destination: LatLon,
    departure_time_epoch_seconds: i64,
    options: SearchOptions,
    token: &CancellationToken,
) -> Result<SearchResult, QueryError> {
    origin.validate("origin")?;
    destination.validate("destination")?;
    validate_options(&options)?;

    let token = match options.timeout_ms {
        Some(ms) => token.with_deadline(ms),
        None => token.clone(),
    };

    // The service day starts at UTC midnight of the calendar date containing
    // the query's timestamp; a timetable builder already assumes one fixed
    // operating timezone per feed, so no per-feed timezone lookup is needed
    // here.
    let departure_date = DateTime::from_timestamp(departure_time_epoch_seconds, 0)
        .ok_or_else(|| QueryError::InvalidInput("departure time out of range".into()))?
        .date_naive();
    let service_day_epoch_seconds = departure_date
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc()
        .timestamp();
    let departure_time: Time = (departure_time_epoch_seconds - service_day_epoch_seconds) as Time;

    let access = model.near(origin.lat, origin.lon, options.walk.max_walk_radius_m, options.walk);
    if access.is_empty() {
        return Err(QueryError::NoAccessStops);
    }
    let egress = model.near(
        destination.lat,
        destination.lon,
        options.walk.max_walk_radius_m,
        options.walk,
    );
    if egress.is_empty() {
        return Err(QueryError::NoEgressStops);
    }

    debug!(
        "search: {} access stops, {} egress stops, departing {}s into service day {}",
        access.len(),
        egress.len(),
        departure_time,
        service_day_epoch_seconds
    );

    let state = raptor::run(model.store(), &access, departure_time, &options, &token)?;
    let rounds_run = state.rounds_run;

    let candidates = reconstruct_all(model.store(), &state, &egress);
    let journeys = filter_pareto(candidates);

    if journeys.is_empty() {
        return Err(QueryError::NoJourneyFound);
    }

    Ok(SearchResult {
        journeys,
        meta: SearchMeta {
            service_day_epoch_seconds,
            access_stop_count: access.len(),
            egress_stop_count: egress.len(),
            rounds_run,
        },
    })
}

fn validate_options(options: &SearchOptions) -> Result<(), QueryError> {
    if options.walk.max_walk_radius_m <= 0.0 || !options.walk.max_walk_radius_m.is_finite() {
        return Err(QueryError::InvalidInput(
            "max_walk_radius_m must be a positive, finite number of meters".into(),
        ));
    }
    if options.walk.walk_speed_mps <= 0.0 || !options.walk.walk_speed_mps.is_finite() {
        return Err(QueryError::InvalidInput(
            "walk_speed_mps must be a positive, finite speed".into(),
        ));
    }
    if options.walk.walk_penalty < 1.0 || !options.walk.walk_penalty.is_finite() {
        return Err(QueryError::InvalidInput(
            "walk_penalty must be finite and at least 1.0".into(),
        ));
    }
    if options.max_transfers == 0 {
        return Err(QueryError::InvalidInput(
            "max_transfers must allow at least a direct ride (>= 0 transfers needs >= 1 round)"
                .into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FeedLoader, FeedStop, FeedStopTime, FeedTrip};

    struct TwoStops;

    impl FeedLoader for TwoStops {
        fn stops(&self) -> Vec<FeedStop> {
            vec![
                FeedStop { stop_id: "X".into(), lat: 0.0, lon: 0.0 },
                FeedStop { stop_id: "Y".into(), lat: 0.0, lon: 0.01 },
            ]
        }
        fn trips(&self) -> Vec<FeedTrip> {
            vec![FeedTrip {
                trip_id: "T1".into(),
                route_key: "R1".into(),
                stop_times: vec![
                    FeedStopTime { stop_id: "X".into(), arrival: 600, departure: 600 },
                    FeedStopTime { stop_id: "Y".into(), arrival: 900, departure: 900 },
                ],
            }]
        }
    }

    #[test]
    fn direct_ride_is_found() {
        let model = TransitModel::build(&TwoStops).unwrap();
        let result = search(
            &model,
            LatLon { lat: 0.0, lon: 0.0 },
            LatLon { lat: 0.0, lon: 0.01 },
            500,
            SearchOptions::default(),
        )
        .unwrap();

        assert_eq!(result.journeys.len(), 1);
        let journey = &result.journeys[0];
        assert_eq!(journey.arrival_time, 900);
        assert_eq!(journey.transfer_count, 0);
    }

    #[test]
    fn invalid_latitude_is_rejected() {
        let model = TransitModel::build(&TwoStops).unwrap();
        let err = search(
            &model,
            LatLon { lat: 200.0, lon: 0.0 },
            LatLon { lat: 0.0, lon: 0.01 },
            500,
            SearchOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::InvalidInput(_)));
    }

    #[test]
    fn distant_origin_has_no_access_stops() {
        let model = TransitModel::build(&TwoStops).unwrap();
        let err = search(
            &model,
            LatLon { lat: 45.0, lon: 45.0 },
            LatLon { lat: 0.0, lon: 0.01 },
            500,
            SearchOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, QueryError::NoAccessStops);
    }
}
