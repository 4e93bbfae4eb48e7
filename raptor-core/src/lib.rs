//! Pareto-optimal RAPTOR transit journey query engine.
//!
//! Given an origin coordinate, a destination coordinate and a departure
//! time, [`query::search`] returns a Pareto-optimal set of journeys
//! minimising `(arrival_time, transfer_count)`, with walking legs at both
//! ends and between nearby stops.
//!
//! The crate is organised leaves-first, mirroring the dataflow of one
//! query:
//!
//! - [`model`] — the immutable, build-once timetable (stops, synthetic
//!   routes, trips, the stop→route index).
//! - [`spatial`] — the R-tree-backed foot-path index and access/egress
//!   radius search, both answering "which stops are near this point".
//! - [`transit_model`] — wires the two together into one immutable,
//!   publishable snapshot.
//! - the RAPTOR core (not part of the public API; see `query` for the
//!   entry point) — the round-based Pareto search over that snapshot.
//! - [`journey`] — turns per-round labels into ranked, rider-facing
//!   itineraries.
//! - [`query`] — the stateless orchestrator tying all of the above
//!   together: access → RAPTOR → egress → reconstruction → filter.
//!
//! All state beyond the [`transit_model::TransitModel`] itself is
//! per-query scratch, allocated fresh and dropped when `search` returns.

pub mod cancellation;
pub mod config;
pub mod error;
pub mod journey;
pub mod model;
mod raptor;
pub mod query;
pub mod spatial;
pub mod transit_model;
pub mod types;

pub use cancellation::CancellationToken;
pub use config::{SearchOptions, WalkConfig};
pub use error::{BuildError, QueryError};
pub use journey::{Journey, JourneyLeg};
pub use query::{LatLon, SearchMeta, SearchResult, search, search_cancellable};
pub use transit_model::TransitModel;
