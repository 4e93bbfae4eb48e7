use thiserror::Error;

/// Errors surfaced by [`crate::query::search`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no stop within walking radius of the origin")]
    NoAccessStops,
    #[error("no stop within walking radius of the destination")]
    NoEgressStops,
    #[error("no journey reaches any egress stop within the transfer budget")]
    NoJourneyFound,
    #[error("query cancelled")]
    Cancelled,
    #[error("query exceeded its time budget")]
    Timeout,
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

/// Errors raised while constructing a [`crate::model::TimetableStore`] or
/// [`crate::spatial::SpatialIndex`] from a feed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("trip references unknown stop id {0}")]
    UnknownStop(String),
    #[error("trip {0} has fewer than two stop-times")]
    DegenerateTrip(String),
    #[error("trip {trip_id} violates the arr <= dep <= next-arr invariant at position {position}")]
    NonMonotonicTrip { trip_id: String, position: usize },
    #[error("transfer references unknown stop id {0}")]
    UnknownTransferStop(String),
}
