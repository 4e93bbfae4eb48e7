//! JSON-backed [`FeedLoader`]: the server's own, deliberately simple choice
//! of on-disk timetable format.
//!
//! Parsing GTFS (or any other upstream transit feed format) is explicitly
//! out of scope for `raptor-core`; something still has to put a timetable
//! in front of the engine at start-up, so the server reads a single JSON
//! document with the same shape as the `FeedLoader` trait itself. Producing
//! that document from a real GTFS feed is left to a separate conversion
//! step outside this crate.

use std::fs;
use std::path::Path;

use raptor_core::model::{FeedLoader, FeedStop, FeedStopTime, FeedTransfer, FeedTrip};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SnapshotStop {
    stop_id: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct SnapshotStopTime {
    stop_id: String,
    arrival: u32,
    departure: u32,
}

#[derive(Debug, Deserialize)]
struct SnapshotTrip {
    trip_id: String,
    route_key: String,
    stop_times: Vec<SnapshotStopTime>,
}

#[derive(Debug, Deserialize)]
struct SnapshotTransfer {
    from_stop: String,
    to_stop: String,
    duration: u32,
}

/// A parsed snapshot file, ready to hand to `TransitModel::build`.
#[derive(Debug, Deserialize)]
pub struct Snapshot {
    stops: Vec<SnapshotStop>,
    trips: Vec<SnapshotTrip>,
    #[serde(default)]
    transfers: Vec<SnapshotTransfer>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let text = fs::read_to_string(path).map_err(|e| SnapshotError::Read(path.to_owned(), e))?;
        serde_json::from_str(&text).map_err(|e| SnapshotError::Parse(path.to_owned(), e))
    }
}

impl FeedLoader for Snapshot {
    fn stops(&self) -> Vec<FeedStop> {
        self.stops
            .iter()
            .map(|s| FeedStop { stop_id: s.stop_id.clone(), lat: s.lat, lon: s.lon })
            .collect()
    }

    fn trips(&self) -> Vec<FeedTrip> {
        self.trips
            .iter()
            .map(|t| FeedTrip {
                trip_id: t.trip_id.clone(),
                route_key: t.route_key.clone(),
                stop_times: t
                    .stop_times
                    .iter()
                    .map(|st| FeedStopTime {
                        stop_id: st.stop_id.clone(),
                        arrival: st.arrival,
                        departure: st.departure,
                    })
                    .collect(),
            })
            .collect()
    }

    fn transfers(&self) -> Vec<FeedTransfer> {
        self.transfers
            .iter()
            .map(|t| FeedTransfer {
                from_stop: t.from_stop.clone(),
                to_stop: t.to_stop.clone(),
                duration: t.duration,
            })
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read timetable snapshot {0}: {1}")]
    Read(std::path::PathBuf, std::io::Error),
    #[error("failed to parse timetable snapshot {0}: {1}")]
    Parse(std::path::PathBuf, serde_json::Error),
}
