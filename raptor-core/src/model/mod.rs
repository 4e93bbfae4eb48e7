//! Data model for the transit timetable
//!
//! Flat arrays keyed by dense integer indices for stops, routes, trips, with
//! CSR-style neighbour lists for the per-stop route index. This is the
//! single biggest performance lever over an object-graph representation for
//! a cache-sensitive graph algorithm like RAPTOR.

mod builder;
mod store;
mod types;

pub use builder::{FeedLoader, FeedStop, FeedStopTime, FeedTransfer, FeedTrip, build_timetable};
pub use store::TimetableStore;
pub use types::{Route, Stop, StopTime, Transfer, Trip};
