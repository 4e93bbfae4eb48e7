//! Publishable snapshot combining the [`TimetableStore`] with the
//! [`SpatialIndex`] used both to finish building its foot-paths and to
//! answer Access/Egress queries at search time.
//!
//! A [`TransitModel`] is build-once and read-only: §5's read-copy-update
//! refresh scheme is just publishing a new `Arc<TransitModel>` and letting
//! in-flight queries keep the `Arc` clone they captured.

use crate::config::WalkConfig;
use crate::error::BuildError;
use crate::model::{FeedLoader, TimetableStore, Transfer, build_timetable};
use crate::spatial::SpatialIndex;
use crate::types::{Duration, StopId, Time};

/// The immutable, build-once timetable and foot-path snapshot a query runs
/// against.
#[derive(Debug, Clone)]
pub struct TransitModel {
    store: TimetableStore,
    spatial: SpatialIndex,
}

impl TransitModel {
    /// Builds a model from a feed loader using the default [`WalkConfig`].
    pub fn build(loader: &dyn FeedLoader) -> Result<Self, BuildError> {
        Self::build_with_walk_config(loader, WalkConfig::default())
    }

    /// Builds a model from a feed loader, computing foot-paths with the
    /// given walking parameters.
    ///
    /// Construction order matches §3's lifecycle: the timetable is built
    /// first, then the spatial index is built over its stops, then foot-paths
    /// are computed and merged with any extra transfers the loader supplies
    /// before being flattened back into the store's CSR layout.
    pub fn build_with_walk_config(
        loader: &dyn FeedLoader,
        walk: WalkConfig,
    ) -> Result<Self, BuildError> {
        let store = build_timetable(loader)?;
        let spatial = SpatialIndex::build(store.stops());

        let mut foot_paths = spatial.compute_foot_paths(walk);
        merge_feed_transfers(&store, &mut foot_paths, loader)?;

        let store = store.with_footpaths(foot_paths);
        Ok(Self { store, spatial })
    }

    #[must_use]
    pub fn store(&self) -> &TimetableStore {
        &self.store
    }

    #[must_use]
    pub fn spatial(&self) -> &SpatialIndex {
        &self.spatial
    }

    /// Access/Egress resolution: every stop within `radius_m` of
    /// `(lat, lon)`, with an estimated walk time.
    #[must_use]
    pub fn near(&self, lat: f64, lon: f64, radius_m: f64, walk: WalkConfig) -> Vec<(StopId, Duration)> {
        self.spatial.near(lat, lon, radius_m, walk)
    }
}

/// Folds a loader's explicit [`crate::model::FeedTransfer`] list into the
/// computed foot-path lists, symmetrically, keeping the shorter duration
/// when a pair is already covered by the coordinate-based computation.
fn merge_feed_transfers(
    store: &TimetableStore,
    foot_paths: &mut [Vec<Transfer>],
    loader: &dyn FeedLoader,
) -> Result<(), BuildError> {
    for transfer in loader.transfers() {
        let from = store
            .stop_index(&transfer.from_stop)
            .ok_or_else(|| BuildError::UnknownTransferStop(transfer.from_stop.clone()))?;
        let to = store
            .stop_index(&transfer.to_stop)
            .ok_or_else(|| BuildError::UnknownTransferStop(transfer.to_stop.clone()))?;

        insert_or_improve(&mut foot_paths[from], to, transfer.duration);
        if from != to {
            insert_or_improve(&mut foot_paths[to], from, transfer.duration);
        }
    }
    Ok(())
}

fn insert_or_improve(neighbours: &mut Vec<Transfer>, target: StopId, duration: Time) {
    if let Some(existing) = neighbours.iter_mut().find(|t| t.target_stop == target) {
        existing.duration = existing.duration.min(duration);
    } else {
        neighbours.push(Transfer {
            target_stop: target,
            duration,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FeedStop, FeedStopTime, FeedTransfer, FeedTrip};

    struct TestLoader {
        stops: Vec<FeedStop>,
        trips: Vec<FeedTrip>,
        transfers: Vec<FeedTransfer>,
    }

    impl FeedLoader for TestLoader {
        fn stops(&self) -> Vec<FeedStop> {
            self.stops.clone()
        }
        fn trips(&self) -> Vec<FeedTrip> {
            self.trips.clone()
        }
        fn transfers(&self) -> Vec<FeedTransfer> {
            self.transfers.clone()
        }
    }

    #[test]
    fn feed_transfer_is_merged_symmetrically() {
        let loader = TestLoader {
            stops: vec![
                FeedStop { stop_id: "A".into(), lat: 0.0, lon: 0.0 },
                // Far enough apart that the spatial index alone would not
                // connect these two stops.
                FeedStop { stop_id: "B".into(), lat: 1.0, lon: 1.0 },
            ],
            trips: vec![FeedTrip {
                trip_id: "T1".into(),
                route_key: "R1".into(),
                stop_times: vec![
                    FeedStopTime { stop_id: "A".into(), arrival: 0, departure: 0 },
                    FeedStopTime { stop_id: "B".into(), arrival: 100, departure: 100 },
                ],
            }],
            transfers: vec![FeedTransfer {
                from_stop: "A".into(),
                to_stop: "B".into(),
                duration: 45,
            }],
        };

        let model = TransitModel::build(&loader).unwrap();
        let a = model.store().stop_index("A").unwrap();
        let b = model.store().stop_index("B").unwrap();

        let a_neighbours = model.store().foot_neighbours(a);
        let b_neighbours = model.store().foot_neighbours(b);
        assert!(a_neighbours.iter().any(|t| t.target_stop == b && t.duration == 45));
        assert!(b_neighbours.iter().any(|t| t.target_stop == a && t.duration == 45));
    }
}
