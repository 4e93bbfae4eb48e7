//! Basic types for the transit data model

use crate::types::{StopId, Time};

/// A boarding/alighting point with a geographic coordinate.
#[derive(Debug, Clone)]
pub struct Stop {
    /// Stable, upstream-assigned identifier.
    pub stop_id: String,
    pub lat: f64,
    pub lon: f64,
    /// Index of the start of this stop's slice in `stop_routes`.
    pub(crate) routes_start: usize,
    pub(crate) routes_len: usize,
    /// Index of the start of this stop's slice in the foot-path CSR array.
    pub(crate) transfers_start: usize,
    pub(crate) transfers_len: usize,
}

/// A group of trips sharing an identical ordered stop sequence.
///
/// A stop may appear more than once in the sequence (loop routes); the
/// 0-based position within the sequence, not the stop id, identifies a
/// boarding point.
#[derive(Debug, Clone)]
pub struct Route {
    /// Synthetic id, stable only for the lifetime of one [`super::TimetableStore`].
    pub route_id: String,
    pub num_stops: usize,
    pub num_trips: usize,
    /// Index of the start of this route's stop sequence in `route_stops`.
    pub(crate) stops_start: usize,
    /// Index of the start of this route's first trip's stop-times in
    /// `stop_times`; trip `t`'s stop-times start at `trips_start + t * num_stops`.
    pub(crate) trips_start: usize,
}

/// Arrival/departure time at one position of one trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopTime {
    pub arrival: Time,
    pub departure: Time,
}

/// One realisation of a route, identified only by its index within the
/// route's trip list (trips carry no independent identity beyond that,
/// mirroring the flat `stop_times` layout).
#[derive(Debug, Clone)]
pub struct Trip {
    pub trip_id: String,
}

/// A walkable edge between two stops, symmetric by construction.
#[derive(Debug, Clone, Copy)]
pub struct Transfer {
    pub target_stop: StopId,
    pub duration: Time,
}
