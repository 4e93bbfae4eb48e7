//! Deduplication and Pareto-domination filtering of candidate journeys.

use hashbrown::HashSet;

use super::types::Journey;

/// `a` dominates `b` on `(arrival_time, transfer_count)`: no worse on
/// either criterion, strictly better on at least one.
fn dominates(a: &Journey, b: &Journey) -> bool {
    a.arrival_time <= b.arrival_time
        && a.transfer_count <= b.transfer_count
        && (a.arrival_time < b.arrival_time || a.transfer_count < b.transfer_count)
}

/// Deduplicates identical candidates and filters the rest down to the
/// Pareto frontier on
/// `(arrival_time, transfer_count)`. Survivors are sorted by arrival time,
/// then transfer count, then total walking time, then first-ride departure.
pub(crate) fn filter_pareto(journeys: Vec<Journey>) -> Vec<Journey> {
    let mut seen = HashSet::new();
    let candidates: Vec<Journey> = journeys.into_iter().filter(|j| seen.insert(j.clone())).collect();

    let mut frontier: Vec<Journey> = Vec::new();
    for candidate in candidates {
        if frontier.iter().any(|survivor| dominates(survivor, &candidate)) {
            continue;
        }
        frontier.retain(|survivor| !dominates(&candidate, survivor));
        frontier.push(candidate);
    }

    frontier.sort_by(|a, b| {
        a.arrival_time
            .cmp(&b.arrival_time)
            .then(a.transfer_count.cmp(&b.transfer_count))
            .then(a.walking_seconds.cmp(&b.walking_seconds))
            .then(a.first_ride_departure().cmp(&b.first_ride_departure()))
    });
    frontier
}
