//! Walks a query's per-round predecessor traces backward into [`Journey`]s.

use crate::model::TimetableStore;
use crate::raptor::{Predecessor, RaptorState};
use crate::types::{Duration, StopId, Time};

use super::types::{Journey, JourneyLeg};

/// Every candidate journey reachable at any egress stop, for any round. A
/// stop's recorded label exists in round `k` only when round `k` itself
/// improved on the stop's global best, so this naturally enumerates exactly
/// the rounds worth reconstructing, one candidate per round.
/// Candidates are neither deduplicated nor Pareto-filtered yet.
pub(crate) fn reconstruct_all(
    store: &TimetableStore,
    state: &RaptorState,
    egress: &[(StopId, Duration)],
) -> Vec<Journey> {
    let mut journeys = Vec::new();
    for &(stop, duration) in egress {
        for round in 0..state.num_rounds() {
            if let Some(journey) = reconstruct_one(store, state, stop, duration, round) {
                journeys.push(journey);
            }
        }
    }
    journeys
}

fn reconstruct_one(
    store: &TimetableStore,
    state: &RaptorState,
    egress_stop: StopId,
    egress_duration: Duration,
    round: usize,
) -> Option<Journey> {
    let arrival_at_stop = state.arrival_times[round][egress_stop];
    if arrival_at_stop == Time::MAX {
        return None;
    }

    let mut legs = Vec::new();
    let mut walking_seconds: Duration = egress_duration;
    let mut stop = egress_stop;
    let mut current_round = round;
    let departure_time;

    loop {
        match state.predecessors[current_round][stop] {
            Predecessor::None => return None,
            Predecessor::Access { duration } => {
                let arrival = state.arrival_times[current_round][stop];
                walking_seconds = walking_seconds.saturating_add(duration);
                departure_time = arrival.saturating_sub(duration);
                break;
            }
            Predecessor::Ride {
                route,
                trip,
                from_stop,
                from_position,
                to_position,
            } => {
                let row = store.trip_stop_times(route, trip);
                legs.push(JourneyLeg::Ride {
                    from_stop: store.stop_id_str(from_stop)?.to_string(),
                    to_stop: store.stop_id_str(stop)?.to_string(),
                    from_time: row[from_position].departure,
                    to_time: row[to_position].arrival,
                    route_id: store.route_id_str(route)?.to_string(),
                    trip_id: store.trip_id_str(route, trip)?.to_string(),
                    board_position: from_position,
                    alight_position: to_position,
                });
                stop = from_stop;
                // `from_stop`'s label may have been set several rounds
                // earlier than this ride's own round (it only needed to be
                // the best arrival reachable with at most `current_round - 1`
                // rides, not one freshly set in that exact round); follow
                // the state's own record of which round actually owns it.
                current_round = state.owner_round[from_stop];
            }
            Predecessor::Walk { from_stop, duration } => {
                let to_time = state.arrival_times[current_round][stop];
                let from_time = to_time.saturating_sub(duration);
                walking_seconds = walking_seconds.saturating_add(duration);
                legs.push(JourneyLeg::Walk {
                    from_stop: store.stop_id_str(from_stop)?.to_string(),
                    to_stop: store.stop_id_str(stop)?.to_string(),
                    from_time,
                    to_time,
                });
                stop = from_stop;
            }
        }
    }

    legs.reverse();
    let ride_count = legs
        .iter()
        .filter(|leg| matches!(leg, JourneyLeg::Ride { .. }))
        .count();

    Some(Journey {
        departure_time,
        arrival_time: arrival_at_stop.saturating_add(egress_duration),
        transfer_count: ride_count.saturating_sub(1),
        walking_seconds,
        legs,
    })
}
