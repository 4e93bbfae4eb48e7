//! Turning RAPTOR's per-round labels into ranked, rider-facing itineraries.

mod pareto;
mod reconstruct;
mod types;

pub(crate) use pareto::filter_pareto;
pub(crate) use reconstruct::reconstruct_all;
pub use types::{Journey, JourneyLeg};
