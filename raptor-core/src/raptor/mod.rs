//! RAPTOR (Round-bAsed Public Transit Optimized Router): the round-based
//! scan that produces per-round arrival labels and predecessor traces,
//! retained for every round so journeys can later be reconstructed
//! independently for each ride count.

mod engine;
mod route_queue;
mod state;

pub(crate) use engine::run;
pub(crate) use state::{Predecessor, RaptorState};
