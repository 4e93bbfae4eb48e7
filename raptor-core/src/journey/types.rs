//! Public journey output types.

use crate::types::{Duration, Position, Time};

/// One leg of a reconstructed journey.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JourneyLeg {
    /// A walking transfer between two stops (not the initial access or
    /// final egress walk, which are folded into the journey's
    /// `departure_time`/`arrival_time` instead of appearing as a leg).
    Walk {
        from_stop: String,
        to_stop: String,
        from_time: Time,
        to_time: Time,
    },
    /// A ride on one trip of one route, boarded and alighted at specific
    /// positions in the route's stop sequence (not stop ids, since a loop
    /// route may visit the same stop more than once).
    Ride {
        from_stop: String,
        to_stop: String,
        from_time: Time,
        to_time: Time,
        route_id: String,
        trip_id: String,
        board_position: Position,
        alight_position: Position,
    },
}

/// A complete, Pareto-surviving itinerary from the query's origin point to
/// its destination point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Journey {
    pub departure_time: Time,
    pub arrival_time: Time,
    pub transfer_count: usize,
    /// Total time spent walking: the initial access leg, every walk leg,
    /// and the final egress leg. Used to break ties between journeys that
    /// are otherwise Pareto-equal.
    pub walking_seconds: Duration,
    pub legs: Vec<JourneyLeg>,
}

impl Journey {
    /// The departure time of the first ride, or the journey's overall
    /// departure time if it has no rides at all (a pure walk).
    #[must_use]
    pub fn first_ride_departure(&self) -> Time {
        self.legs
            .iter()
            .find_map(|leg| match leg {
                JourneyLeg::Ride { from_time, .. } => Some(*from_time),
                JourneyLeg::Walk { .. } => None,
            })
            .unwrap_or(self.departure_time)
    }
}
