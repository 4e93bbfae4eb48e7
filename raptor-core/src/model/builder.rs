//! Construction of a [`TimetableStore`] from a transport-agnostic feed
//!
//! Raw GTFS-style ingestion is out of scope; a [`FeedLoader`] is the
//! consumed interface that already carries structured stops and per-trip
//! stop-times. This module's job is the route re-grouping: trips are
//! grouped into synthetic routes keyed by the exact tuple of resolved stop
//! indices, not by whatever route identifier the upstream feed used, so
//! that every synthetic route's trips share one stop sequence (the RAPTOR
//! per-route scan precondition).

use hashbrown::HashMap;
use itertools::Itertools;
use log::info;

use crate::error::BuildError;
use crate::types::{Position, RouteId, StopId, Time};

use super::store::TimetableStore;
use super::types::{Route, Stop, StopTime, Trip};

/// One stop as delivered by a feed loader.
#[derive(Debug, Clone)]
pub struct FeedStop {
    pub stop_id: String,
    pub lat: f64,
    pub lon: f64,
}

/// One scheduled stop-time as delivered by a feed loader.
#[derive(Debug, Clone)]
pub struct FeedStopTime {
    pub stop_id: String,
    pub arrival: Time,
    pub departure: Time,
}

/// One trip as delivered by a feed loader: an upstream route key (not
/// necessarily unique per stop sequence) and its ordered stop-times.
#[derive(Debug, Clone)]
pub struct FeedTrip {
    pub trip_id: String,
    pub route_key: String,
    pub stop_times: Vec<FeedStopTime>,
}

/// An extra foot-path supplied directly by the feed, alongside whatever the
/// spatial index computes from stop coordinates.
#[derive(Debug, Clone)]
pub struct FeedTransfer {
    pub from_stop: String,
    pub to_stop: String,
    pub duration: Time,
}

/// Transport-agnostic feed interface consumed by [`build_timetable`].
///
/// A GTFS (or other) adapter lives outside this crate and implements this
/// trait; the store has no knowledge of any on-disk format.
pub trait FeedLoader {
    fn stops(&self) -> Vec<FeedStop>;
    fn trips(&self) -> Vec<FeedTrip>;
    /// Extra foot-paths beyond what coordinate-based construction would
    /// find. Default: none.
    fn transfers(&self) -> Vec<FeedTransfer> {
        Vec::new()
    }
}

/// Builds the stop/route/trip arrays of a [`TimetableStore`] from a loader.
///
/// Foot-paths are not populated here: [`super::TimetableStore`] comes back
/// with every stop's transfer slice empty. See
/// [`crate::transit_model::TransitModel::build`] for the full pipeline that
/// also runs the Foot-path Index over the resulting stops.
pub fn build_timetable(loader: &dyn FeedLoader) -> Result<TimetableStore, BuildError> {
    let (stops, stop_index) = build_stops(loader);
    let (routes, route_stops, stop_times, trips, occurrences) =
        build_routes(loader, &stop_index)?;

    let (stops, stop_routes) = attach_route_occurrences(stops, occurrences);

    info!(
        "timetable built: {} stops, {} synthetic routes, {} trips",
        stops.len(),
        routes.len(),
        trips.iter().map(Vec::len).sum::<usize>()
    );

    Ok(TimetableStore {
        stops,
        routes,
        trips,
        route_stops,
        stop_times,
        stop_routes,
        transfers: Vec::new(),
        stop_index,
    })
}

fn build_stops(loader: &dyn FeedLoader) -> (Vec<Stop>, HashMap<String, StopId>) {
    let feed_stops = loader.stops();
    let mut stop_index = HashMap::with_capacity(feed_stops.len());
    let mut stops = Vec::with_capacity(feed_stops.len());

    for feed_stop in feed_stops {
        let idx = stops.len();
        stop_index.insert(feed_stop.stop_id.clone(), idx);
        stops.push(Stop {
            stop_id: feed_stop.stop_id,
            lat: feed_stop.lat,
            lon: feed_stop.lon,
            routes_start: 0,
            routes_len: 0,
            transfers_start: 0,
            transfers_len: 0,
        });
    }

    (stops, stop_index)
}

type RouteOccurrences = HashMap<StopId, Vec<(RouteId, Position)>>;

#[allow(clippy::type_complexity)]
fn build_routes(
    loader: &dyn FeedLoader,
    stop_index: &HashMap<String, StopId>,
) -> Result<
    (
        Vec<Route>,
        Vec<StopId>,
        Vec<StopTime>,
        Vec<Vec<Trip>>,
        RouteOccurrences,
    ),
    BuildError,
> {
    // Group by (upstream route key, resolved stop-index sequence). Two
    // upstream trips sharing a route key but disagreeing on stop sequence
    // land in different groups, and therefore different synthetic routes.
    let mut groups: HashMap<(String, Vec<StopId>), Vec<FeedTrip>> = HashMap::new();

    for trip in loader.trips() {
        if trip.stop_times.len() < 2 {
            return Err(BuildError::DegenerateTrip(trip.trip_id));
        }
        let mut sequence = Vec::with_capacity(trip.stop_times.len());
        for stop_time in &trip.stop_times {
            let idx = *stop_index
                .get(&stop_time.stop_id)
                .ok_or_else(|| BuildError::UnknownStop(stop_time.stop_id.clone()))?;
            sequence.push(idx);
        }
        groups
            .entry((trip.route_key.clone(), sequence))
            .or_default()
            .push(trip);
    }

    // Deterministic iteration order, independent of hash-map internals.
    let mut group_entries: Vec<_> = groups.into_iter().collect();
    group_entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut routes = Vec::new();
    let mut route_stops = Vec::new();
    let mut stop_times = Vec::new();
    let mut trips: Vec<Vec<Trip>> = Vec::new();
    let mut occurrences: RouteOccurrences = HashMap::new();
    let mut variant_counts: HashMap<String, usize> = HashMap::new();

    for ((route_key, sequence), mut group_trips) in group_entries {
        validate_monotonic(&group_trips)?;
        // Trips within a synthetic route are sorted by departure time at
        // position 0.
        group_trips.sort_by_key(|t| t.stop_times[0].departure);

        let variant = variant_counts.entry(route_key.clone()).or_insert(0);
        let route_id = if *variant == 0 {
            route_key.clone()
        } else {
            format!("{route_key}#{variant}")
        };
        *variant += 1;

        let route_idx = routes.len();
        let stops_start = route_stops.len();
        let trips_start = stop_times.len();
        let num_stops = sequence.len();
        let num_trips = group_trips.len();

        route_stops.extend_from_slice(&sequence);

        let mut route_trips = Vec::with_capacity(num_trips);
        for trip in group_trips {
            stop_times.extend(
                trip.stop_times
                    .iter()
                    .map(|st| StopTime {
                        arrival: st.arrival,
                        departure: st.departure,
                    }),
            );
            route_trips.push(Trip {
                trip_id: trip.trip_id,
            });
        }
        trips.push(route_trips);

        for (position, &stop) in sequence.iter().enumerate() {
            occurrences
                .entry(stop)
                .or_default()
                .push((route_idx, position));
        }

        routes.push(Route {
            route_id,
            num_stops,
            num_trips,
            stops_start,
            trips_start,
        });
    }

    Ok((routes, route_stops, stop_times, trips, occurrences))
}

/// For every trip, `arr[p] <= dep[p] <= arr[p+1]`.
fn validate_monotonic(trips: &[FeedTrip]) -> Result<(), BuildError> {
    for trip in trips {
        for (position, stop_time) in trip.stop_times.iter().enumerate() {
            if stop_time.arrival > stop_time.departure {
                return Err(BuildError::NonMonotonicTrip {
                    trip_id: trip.trip_id.clone(),
                    position,
                });
            }
        }
        for (position, (stop_time, next)) in trip.stop_times.iter().tuple_windows().enumerate() {
            if stop_time.departure > next.arrival {
                return Err(BuildError::NonMonotonicTrip {
                    trip_id: trip.trip_id.clone(),
                    position,
                });
            }
        }
    }
    Ok(())
}

fn attach_route_occurrences(
    mut stops: Vec<Stop>,
    mut occurrences: RouteOccurrences,
) -> (Vec<Stop>, Vec<(RouteId, Position)>) {
    let mut stop_routes = Vec::new();
    for (idx, stop) in stops.iter_mut().enumerate() {
        let occ = occurrences.remove(&idx).unwrap_or_default();
        stop.routes_start = stop_routes.len();
        stop.routes_len = occ.len();
        stop_routes.extend(occ);
    }
    (stops, stop_routes)
}
