//! Builds the set of routes to scan in one round from the stops marked in
//! the previous round.

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;

use crate::model::TimetableStore;
use crate::types::{Position, RouteId};

/// For every route serving at least one marked stop, the earliest position
/// (smallest index) at which that route can be boarded. A route with
/// multiple marked stops only needs to be scanned once, starting from
/// whichever marked stop comes first in its sequence.
pub(crate) fn build_route_queue(
    store: &TimetableStore,
    marked: &FixedBitSet,
) -> Vec<(RouteId, Position)> {
    let mut best_position: HashMap<RouteId, Position> = HashMap::new();
    for stop in marked.ones() {
        for &(route, position) in store.routes_for_stop(stop) {
            best_position
                .entry(route)
                .and_modify(|existing| {
                    if position < *existing {
                        *existing = position;
                    }
                })
                .or_insert(position);
        }
    }
    best_position.into_iter().collect()
}
