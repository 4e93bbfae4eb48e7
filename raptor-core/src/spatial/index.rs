use geo::{Distance, Haversine, Point};
use rayon::prelude::*;
use rstar::{RTree, primitives::GeomWithData};

use crate::config::WalkConfig;
use crate::model::{Stop, Transfer};
use crate::types::{Duration, StopId};

/// A stop's coordinates in the R-tree, tagged with its dense index.
type IndexedStop = GeomWithData<Point<f64>, StopId>;

/// Meters per degree of latitude; used to turn a meter radius into a
/// conservative degree-space bounding radius for the R-tree query. Longitude
/// degrees shrink with `cos(latitude)`, so the bound widens near the poles
/// and narrows (but never below a safety floor) near the equator.
const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

fn degree_radius(lat_deg: f64, radius_m: f64) -> f64 {
    let cos_lat = lat_deg.to_radians().cos().max(0.01);
    let degrees_lat = radius_m / METERS_PER_DEGREE_LAT;
    let degrees_lon = radius_m / (METERS_PER_DEGREE_LAT * cos_lat);
    degrees_lat.max(degrees_lon)
}

/// R-tree over stop coordinates, used both to build the Foot-path Index and
/// to answer Access/Egress radius queries.
#[derive(Debug)]
pub struct SpatialIndex {
    rtree: RTree<IndexedStop>,
    points: Vec<Point<f64>>,
}

impl SpatialIndex {
    /// Builds the index from the timetable's stops, in stop-index order.
    #[must_use]
    pub fn build(stops: &[Stop]) -> Self {
        let points: Vec<Point<f64>> = stops.iter().map(|s| Point::new(s.lon, s.lat)).collect();
        let indexed: Vec<IndexedStop> = points
            .iter()
            .enumerate()
            .map(|(idx, point)| GeomWithData::new(*point, idx))
            .collect();

        Self {
            rtree: RTree::bulk_load(indexed),
            points,
        }
    }

    /// Every stop within `radius_m` of `origin` (by exact haversine
    /// distance), paired with the straight-line distance in meters.
    fn query_radius(&self, origin: Point<f64>, radius_m: f64) -> Vec<(StopId, f64)> {
        let bound = degree_radius(origin.y(), radius_m);
        self.rtree
            .locate_within_distance(origin, bound * bound)
            .filter_map(|candidate| {
                let distance_m = Haversine.distance(origin, *candidate.geom());
                (distance_m <= radius_m).then_some((candidate.data, distance_m))
            })
            .collect()
    }

    /// Builds the foot-path lists: for every stop, its walkable neighbours
    /// within `walk.max_walk_radius_m`, excluding itself. Symmetric by
    /// construction, since each stop is queried independently against the
    /// same tree and haversine distance is itself symmetric.
    #[must_use]
    pub fn compute_foot_paths(&self, walk: WalkConfig) -> Vec<Vec<Transfer>> {
        (0..self.points.len())
            .into_par_iter()
            .map(|stop| {
                let origin = self.points[stop];
                let mut neighbours: Vec<Transfer> = self
                    .query_radius(origin, walk.max_walk_radius_m)
                    .into_iter()
                    .filter(|&(target, _)| target != stop)
                    .map(|(target, distance_m)| Transfer {
                        target_stop: target,
                        duration: walk.walk_seconds(distance_m),
                    })
                    .collect();
                neighbours.sort_by_key(|t| t.target_stop);
                neighbours
            })
            .collect()
    }

    /// Every stop within `radius_m` of `(lat, lon)`, with an estimated walk
    /// time, sorted by walk time. No upper bound on list size — the walking
    /// radius is the only bound.
    #[must_use]
    pub fn near(&self, lat: f64, lon: f64, radius_m: f64, walk: WalkConfig) -> Vec<(StopId, Duration)> {
        let origin = Point::new(lon, lat);
        let mut result: Vec<(StopId, Duration)> = self
            .query_radius(origin, radius_m)
            .into_iter()
            .map(|(stop, distance_m)| (stop, walk.walk_seconds(distance_m)))
            .collect();
        result.sort_by_key(|&(_, duration)| duration);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, lat: f64, lon: f64) -> Stop {
        Stop {
            stop_id: id.to_string(),
            lat,
            lon,
            routes_start: 0,
            routes_len: 0,
            transfers_start: 0,
            transfers_len: 0,
        }
    }

    #[test]
    fn near_finds_stops_within_radius_only() {
        // ~111m per 0.001 degree of latitude.
        let stops = vec![
            stop("A", 0.0, 0.0),
            stop("B", 0.0005, 0.0), // ~55m away
            stop("C", 0.02, 0.0),   // ~2.2km away
        ];
        let index = SpatialIndex::build(&stops);
        let walk = WalkConfig::default();

        let nearby = index.near(0.0, 0.0, 1000.0, walk);
        let ids: Vec<StopId> = nearby.iter().map(|&(id, _)| id).collect();
        assert!(ids.contains(&0));
        assert!(ids.contains(&1));
        assert!(!ids.contains(&2));
    }

    #[test]
    fn foot_paths_are_symmetric_and_exclude_self() {
        let stops = vec![stop("A", 0.0, 0.0), stop("B", 0.0005, 0.0)];
        let index = SpatialIndex::build(&stops);
        let walk = WalkConfig::default();

        let paths = index.compute_foot_paths(walk);
        assert_eq!(paths.len(), 2);
        assert!(paths[0].iter().all(|t| t.target_stop != 0));
        assert!(paths[1].iter().all(|t| t.target_stop != 1));

        let a_to_b = paths[0].iter().find(|t| t.target_stop == 1).unwrap();
        let b_to_a = paths[1].iter().find(|t| t.target_stop == 0).unwrap();
        assert_eq!(a_to_b.duration, b_to_a.duration);
    }
}
