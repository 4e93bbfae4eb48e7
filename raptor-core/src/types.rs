//! Central type definitions for the raptor-core crate

/// Unique identifier for a stop
///
/// Dense index into the stops array of a [`crate::model::TimetableStore`].
pub type StopId = usize;

/// Unique identifier for a synthetic route
///
/// Dense index into the routes array of a [`crate::model::TimetableStore`].
pub type RouteId = usize;

/// Index of a trip within a route's trip list, sorted by departure time at
/// position 0.
pub type TripId = usize;

/// 0-based index into a route's stop sequence.
///
/// This, not the stop id, identifies a boarding/alighting point: a route may
/// visit the same stop more than once (loop routes).
pub type Position = usize;

/// Seconds since the service day start.
///
/// `0` is midnight; values may exceed `86_400` for trips that run past
/// midnight.
pub type Time = u32;

/// A duration in seconds (walking time, transfer time, ...).
pub type Duration = u32;

/// Round number in the RAPTOR iteration (0 = access only, k = at most k rides).
pub type Round = usize;
