//! The round-based scan: the core of RAPTOR.

use fixedbitset::FixedBitSet;

use crate::cancellation::CancellationToken;
use crate::config::{ROUTE_BATCH, SearchOptions};
use crate::error::QueryError;
use crate::model::TimetableStore;
use crate::types::{Duration, Round, StopId, Time};

use super::route_queue::build_route_queue;
use super::state::{Predecessor, RaptorState};

/// Runs every round of the search and returns the full per-round label and
/// predecessor history. `access` is the set of stops reachable from the
/// query's origin point, each with its walking duration.
pub(crate) fn run(
    store: &TimetableStore,
    access: &[(StopId, Duration)],
    departure_time: Time,
    options: &SearchOptions,
    token: &CancellationToken,
) -> Result<RaptorState, QueryError> {
    let num_rounds = options.max_transfers + 1;
    let mut state = RaptorState::new(store.stop_count(), num_rounds);

    for &(stop, duration) in access {
        let arrival = departure_time.saturating_add(duration);
        if state.update(0, stop, arrival, Predecessor::Access { duration }) {
            state.marked_stops[0].set(stop, true);
        }
    }
    expand_foot_paths(store, &mut state, 0);

    for round in 1..num_rounds {
        if let Some(reason) = token.check() {
            return Err(timeout_error(reason));
        }

        let prev = round - 1;
        let queue = build_route_queue(store, &state.marked_stops[prev]);
        state.marked_stops[prev].clear();

        // Snapshot τ_{k-1} before this round mutates `best_arrival`: the
        // route scan below must never see a label improved by a route
        // already processed in the *same* round, or it would silently grant
        // an extra ride while still charging it to round k-1.
        let prev_best = state.best_arrival.clone();
        let prev_is_ride = state.best_is_ride.clone();

        for (batch_index, &(route, start_pos)) in queue.iter().enumerate() {
            if batch_index % ROUTE_BATCH == 0
                && let Some(reason) = token.check()
            {
                return Err(timeout_error(reason));
            }
            scan_route(
                store,
                &mut state,
                round,
                &prev_best,
                &prev_is_ride,
                route,
                start_pos,
                options,
            );
        }

        expand_foot_paths(store, &mut state, round);
        state.rounds_run = round;

        if state.marked_stops[round].is_clear() {
            break;
        }
    }

    Ok(state)
}

fn timeout_error(reason: crate::cancellation::StopReason) -> QueryError {
    match reason {
        crate::cancellation::StopReason::Cancelled => QueryError::Cancelled,
        crate::cancellation::StopReason::Timeout => QueryError::Timeout,
    }
}

/// Scans a single route starting at `start_pos`, boarding the earliest
/// catchable trip and propagating it to every downstream stop, upgrading to
/// a later trip whenever the previous round's label permits an earlier
/// boarding further along the line.
fn scan_route(
    store: &TimetableStore,
    state: &mut RaptorState,
    round: Round,
    prev_best: &[Time],
    prev_is_ride: &[bool],
    route: usize,
    start_pos: usize,
    options: &SearchOptions,
) {
    let stops = store.route_stops(route);

    let mut boarding = None;
    for (position, &stop) in stops.iter().enumerate().skip(start_pos) {
        let earliest_board = boarding_threshold(prev_best, prev_is_ride, stop, options);
        if earliest_board == Time::MAX {
            continue;
        }
        if let Some(trip) = store.find_earliest_trip(route, position, earliest_board) {
            boarding = Some((trip, position));
            break;
        }
    }

    let Some((mut trip, board_position)) = boarding else {
        return;
    };

    let mut boarding_stop = stops[board_position];
    let mut boarding_position = board_position;
    let mut row = store.trip_stop_times(route, trip);

    // `current_trip` is `none` at `board_position` itself (§4.4 step 2): only
    // `board_position`/`board_stop` are set there, so propagation starts one
    // position downstream of it.
    for (position, &stop) in stops.iter().enumerate().skip(board_position + 1) {
        // Propagate the trip currently being ridden to this position first,
        // using its own row; a switch considered below only takes effect
        // for positions after this one.
        let predecessor = Predecessor::Ride {
            route,
            trip,
            from_stop: boarding_stop,
            from_position: boarding_position,
            to_position: position,
        };
        if state.update(round, stop, row[position].arrival, predecessor) {
            state.marked_stops[round].set(stop, true);
        }

        // Attempt to catch an earlier trip at this position, for positions
        // still to come.
        let earlier_board = boarding_threshold(prev_best, prev_is_ride, stop, options);
        if earlier_board < row[position].departure
            && let Some(new_trip) = store.find_earliest_trip(route, position, earlier_board)
            && new_trip != trip
        {
            trip = new_trip;
            row = store.trip_stop_times(route, trip);
            boarding_stop = stop;
            boarding_position = position;
        }
    }
}

/// The departure time the previous round's label (`τ_{k-1}`, frozen at the
/// start of this round) at `stop` makes available to board, with the
/// minimum interchange time added when that label was itself reached by
/// riding a different trip (no buffer after walking or access, since those
/// already leave the rider standing at the stop).
fn boarding_threshold(
    prev_best: &[Time],
    prev_is_ride: &[bool],
    stop: StopId,
    options: &SearchOptions,
) -> Time {
    let arrival = prev_best[stop];
    if arrival == Time::MAX {
        return Time::MAX;
    }
    if prev_is_ride[stop] {
        arrival.saturating_add(options.same_stop_transfer_seconds)
    } else {
        arrival
    }
}

/// Relaxes every foot-path out of the stops marked in `round`, possibly
/// discovering new stops within the same round. Foot-paths are never
/// chained: a walk always originates at a stop reached this round by riding
/// (or, in round 0, by the initial access walk), never at another walk.
fn expand_foot_paths(store: &TimetableStore, state: &mut RaptorState, round: Round) {
    let current: Vec<StopId> = state.marked_stops[round].ones().collect();
    let mut new_marks = FixedBitSet::with_capacity(store.stop_count());

    for stop in current {
        let base = state.arrival_times[round][stop];
        for transfer in store.foot_neighbours(stop) {
            let candidate = base.saturating_add(transfer.duration);
            let predecessor = Predecessor::Walk {
                from_stop: stop,
                duration: transfer.duration,
            };
            if state.update(round, transfer.target_stop, candidate, predecessor) {
                new_marks.set(transfer.target_stop, true);
            }
        }
    }

    state.marked_stops[round].union_with(&new_marks);
}
