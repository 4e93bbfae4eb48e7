//! Per-round labels and predecessor traces for one running query.

use fixedbitset::FixedBitSet;

use crate::types::{Duration, Position, RouteId, Round, StopId, Time, TripId};

/// How a stop's label in one round was produced.
///
/// A ride always boards using the previous round's labels and a walk always
/// relaxes a label set earlier in the same round — both are implied by
/// which round a label lives in, so neither variant needs to repeat it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Predecessor {
    /// Not reached in this round.
    None,
    /// Reached directly from the query's origin point by walking.
    Access { duration: Duration },
    /// Reached by riding one trip, boarded at `from_stop`/`from_position` and
    /// alighted at `to_position` in the route's stop sequence.
    Ride {
        route: RouteId,
        trip: TripId,
        from_stop: StopId,
        from_position: Position,
        to_position: Position,
    },
    /// Reached by walking a foot-path from `from_stop`.
    Walk { from_stop: StopId, duration: Duration },
}

/// Per-round arrival labels, marks, and predecessor traces for a single
/// query.
///
/// `arrival_times[k][s]` holds a value only in the round `k` where it was
/// the first path to beat the stop's global best (`best_arrival[s]`); all
/// other rounds keep `Time::MAX` for that stop. This is deliberate: a label
/// that doesn't improve on the best arrival found with fewer rides would
/// only ever represent a dominated journey, so it is never recorded.
#[derive(Debug)]
pub(crate) struct RaptorState {
    pub(crate) arrival_times: Vec<Vec<Time>>,
    pub(crate) best_arrival: Vec<Time>,
    /// Whether `best_arrival[s]`'s predecessor is a `Ride`, tracked
    /// cumulatively (unlike `predecessors`, which is sparse per round) so
    /// the boarding check can tell whether a minimum interchange time
    /// applies no matter which round actually set the label.
    pub(crate) best_is_ride: Vec<bool>,
    /// The round that last improved `best_arrival[s]` — equivalently, the
    /// only round whose `arrival_times`/`predecessors` entry for `s` is not
    /// a placeholder. Lets reconstruction jump straight to the round that
    /// actually recorded a stop's predecessor instead of assuming it is
    /// always the immediately preceding one.
    pub(crate) owner_round: Vec<Round>,
    pub(crate) marked_stops: Vec<FixedBitSet>,
    pub(crate) predecessors: Vec<Vec<Predecessor>>,
    /// The highest round index actually scanned before `marked` went empty
    /// or `max_transfers` was reached, set by the engine's round loop. Not
    /// to be confused with [`RaptorState::num_rounds`], the statically
    /// pre-allocated array length.
    pub(crate) rounds_run: usize,
}

impl RaptorState {
    pub(crate) fn new(num_stops: usize, num_rounds: usize) -> Self {
        Self {
            arrival_times: vec![vec![Time::MAX; num_stops]; num_rounds],
            best_arrival: vec![Time::MAX; num_stops],
            best_is_ride: vec![false; num_stops],
            owner_round: vec![0; num_stops],
            marked_stops: (0..num_rounds)
                .map(|_| FixedBitSet::with_capacity(num_stops))
                .collect(),
            predecessors: vec![vec![Predecessor::None; num_stops]; num_rounds],
            rounds_run: 0,
        }
    }

    pub(crate) fn num_rounds(&self) -> usize {
        self.arrival_times.len()
    }

    /// Records `arrival` as round `round`'s label for `stop` if it beats the
    /// stop's best arrival across every round processed so far. This is the
    /// local-pruning check: a label that isn't better than the best already
    /// known would represent a journey dominated by one with fewer rides.
    pub(crate) fn update(
        &mut self,
        round: usize,
        stop: StopId,
        arrival: Time,
        predecessor: Predecessor,
    ) -> bool {
        if arrival < self.best_arrival[stop] {
            self.arrival_times[round][stop] = arrival;
            self.predecessors[round][stop] = predecessor;
            self.best_arrival[stop] = arrival;
            self.best_is_ride[stop] = matches!(predecessor, Predecessor::Ride { .. });
            self.owner_round[stop] = round;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_rejects_non_improving_arrival() {
        let mut state = RaptorState::new(2, 3);
        assert!(state.update(0, 0, 100, Predecessor::Access { duration: 100 }));
        assert!(!state.update(1, 0, 150, Predecessor::Walk { from_stop: 1, duration: 50 }));
        assert_eq!(state.arrival_times[1][0], Time::MAX);
        assert_eq!(state.best_arrival[0], 100);
    }

    #[test]
    fn update_accepts_strictly_better_arrival_in_a_later_round() {
        let mut state = RaptorState::new(2, 3);
        assert!(state.update(0, 0, 100, Predecessor::Access { duration: 100 }));
        assert!(state.update(2, 0, 50, Predecessor::Walk { from_stop: 1, duration: 50 }));
        assert_eq!(state.arrival_times[2][0], 50);
        assert_eq!(state.best_arrival[0], 50);
    }
}
