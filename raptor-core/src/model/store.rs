//! Read-only, build-once timetable store
//!
//! Immutable after [`build_timetable`](super::build_timetable) returns; all
//! query-scoped state lives outside this struct and is freed when a query
//! returns.

use hashbrown::HashMap;

use crate::error::QueryError;
use crate::types::{Position, RouteId, StopId, Time, TripId};

use super::types::{Route, Stop, StopTime, Transfer, Trip};

/// Immutable, read-only timetable: stops, synthetic routes, trips and the
/// stop↔route index, laid out as flat arrays for O(1) dense-index lookups.
#[derive(Debug, Clone)]
pub struct TimetableStore {
    pub(crate) stops: Vec<Stop>,
    pub(crate) routes: Vec<Route>,
    pub(crate) trips: Vec<Vec<Trip>>,
    /// Flattened stop sequence for every route, sliced via `Route::stops_start`.
    pub(crate) route_stops: Vec<StopId>,
    /// Flattened arrival/departure grid: `trip t`'s row starts at
    /// `route.trips_start + t * route.num_stops`.
    pub(crate) stop_times: Vec<StopTime>,
    /// Flattened `(route, position)` occurrences for every stop, sliced via
    /// `Stop::routes_start`. Lists every occurrence, including repeats
    /// within the same route.
    pub(crate) stop_routes: Vec<(RouteId, Position)>,
    /// Flattened foot-path neighbour lists, sliced via `Stop::transfers_start`.
    pub(crate) transfers: Vec<Transfer>,
    /// Upstream `stop_id` to dense index, kept around for resolving
    /// feed-supplied transfers and adapter-facing lookups by stable id.
    pub(crate) stop_index: HashMap<String, StopId>,
}

impl TimetableStore {
    /// Flattens a per-stop transfer list (as produced by the spatial index)
    /// into the store's CSR layout. Consumes and returns `self`
    /// since this only ever runs once, right after construction, before the
    /// store is published.
    #[must_use]
    pub(crate) fn with_footpaths(mut self, per_stop: Vec<Vec<Transfer>>) -> Self {
        debug_assert_eq!(per_stop.len(), self.stops.len());
        let mut flattened = Vec::new();
        for (stop, neighbours) in self.stops.iter_mut().zip(per_stop) {
            stop.transfers_start = flattened.len();
            stop.transfers_len = neighbours.len();
            flattened.extend(neighbours);
        }
        self.transfers = flattened;
        self
    }

    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn stop(&self, stop: StopId) -> Option<&Stop> {
        self.stops.get(stop)
    }

    #[must_use]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    #[must_use]
    pub fn stop_id_str(&self, stop: StopId) -> Option<&str> {
        self.stops.get(stop).map(|s| s.stop_id.as_str())
    }

    /// Resolves an upstream `stop_id` back to its dense index.
    #[must_use]
    pub fn stop_index(&self, stop_id: &str) -> Option<StopId> {
        self.stop_index.get(stop_id).copied()
    }

    #[must_use]
    pub fn route_id_str(&self, route: RouteId) -> Option<&str> {
        self.routes.get(route).map(|r| r.route_id.as_str())
    }

    #[must_use]
    pub fn trip_id_str(&self, route: RouteId, trip: TripId) -> Option<&str> {
        self.trips
            .get(route)
            .and_then(|trips| trips.get(trip))
            .map(|t| t.trip_id.as_str())
    }

    pub(crate) fn validate_stop(&self, stop: StopId) -> Result<(), QueryError> {
        if stop >= self.stops.len() {
            Err(QueryError::InternalInvariant(format!(
                "stop index {stop} out of range"
            )))
        } else {
            Ok(())
        }
    }

    /// `(route, position)` entries for every occurrence of `stop` across all
    /// routes — every occurrence, including repeats within the same route.
    pub(crate) fn routes_for_stop(&self, stop: StopId) -> &[(RouteId, Position)] {
        let s = &self.stops[stop];
        &self.stop_routes[s.routes_start..s.routes_start + s.routes_len]
    }

    /// The ordered stop sequence of a route, by dense stop index.
    pub(crate) fn route_stops(&self, route: RouteId) -> &[StopId] {
        let r = &self.routes[route];
        &self.route_stops[r.stops_start..r.stops_start + r.num_stops]
    }

    /// The arrival/departure row for trip `trip` of `route`.
    pub(crate) fn trip_stop_times(&self, route: RouteId, trip: TripId) -> &[StopTime] {
        let r = &self.routes[route];
        let start = r.trips_start + trip * r.num_stops;
        &self.stop_times[start..start + r.num_stops]
    }

    pub(crate) fn trip(&self, route: RouteId, trip: TripId) -> &Trip {
        &self.trips[route][trip]
    }

    /// Foot-paths originating at `stop`.
    pub(crate) fn foot_neighbours(&self, stop: StopId) -> &[Transfer] {
        let s = &self.stops[stop];
        &self.transfers[s.transfers_start..s.transfers_start + s.transfers_len]
    }

    /// Binary search for the earliest trip of `route` whose departure at
    /// `position` is no earlier than `earliest_departure`.
    ///
    /// Valid because trips within a route are sorted by departure at
    /// position 0 and pointwise non-overtaking at every later position.
    pub(crate) fn find_earliest_trip(
        &self,
        route: RouteId,
        position: Position,
        earliest_departure: Time,
    ) -> Option<TripId> {
        let r = &self.routes[route];
        let mut low = 0usize;
        let mut high = r.num_trips;
        let mut result = None;
        while low < high {
            let mid = low + (high - low) / 2;
            let row_start = r.trips_start + mid * r.num_stops;
            let departure = self.stop_times[row_start + position].departure;
            if departure >= earliest_departure {
                result = Some(mid);
                high = mid;
            } else {
                low = mid + 1;
            }
        }
        result
    }
}
