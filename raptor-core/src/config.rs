//! Explicit configuration records passed into builders and queries.
//!
//! No process-wide mutable state: every derived constant lives on one of
//! these structs and is threaded through explicitly.

use crate::types::{Duration, Time};

/// Maximum number of RAPTOR rounds (`k` = at most this many rides).
pub const DEFAULT_K_MAX: usize = 7;

/// Default walking speed, ≈5 km/h.
pub const DEFAULT_WALK_SPEED_MPS: f64 = 1.389;

/// Default multiplier applied to straight-line walking time to approximate
/// a real pedestrian route.
pub const DEFAULT_WALK_PENALTY: f64 = 2.0;

/// Default maximum walking radius for access, egress and stop-to-stop
/// transfers, in meters.
pub const DEFAULT_MAX_WALK_RADIUS_M: f64 = 1000.0;

/// Number of routes processed between cancellation/timeout checks within a
/// round's scan phase.
pub const ROUTE_BATCH: usize = 256;

/// Configuration governing foot-path construction and walking-time estimates.
///
/// Shared by [`crate::spatial::SpatialIndex`] construction and the
/// access/egress resolver, so both agree on the same walking-time formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkConfig {
    pub max_walk_radius_m: f64,
    pub walk_speed_mps: f64,
    pub walk_penalty: f64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_walk_radius_m: DEFAULT_MAX_WALK_RADIUS_M,
            walk_speed_mps: DEFAULT_WALK_SPEED_MPS,
            walk_penalty: DEFAULT_WALK_PENALTY,
        }
    }
}

impl WalkConfig {
    /// Effective walking time for a straight-line distance in meters:
    /// `haversine_m / walk_speed_mps * walk_penalty`.
    #[must_use]
    pub fn walk_seconds(&self, distance_m: f64) -> Duration {
        ((distance_m / self.walk_speed_mps) * self.walk_penalty).ceil() as Duration
    }

    /// `MAX_WALK_SECONDS`, derived once from the radius and walking formula.
    #[must_use]
    pub fn max_walk_seconds(&self) -> Duration {
        self.walk_seconds(self.max_walk_radius_m)
    }
}

/// Per-query search options. All fields are optional on the external query
/// API (`search`'s `options` parameter); this struct carries the resolved
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    pub walk: WalkConfig,
    pub max_transfers: usize,
    /// Minimum interchange time applied when boarding at a stop just
    /// arrived at on a different ride. Defaults to 0.
    pub same_stop_transfer_seconds: Time,
    /// Wall-clock budget for the whole query. `None` disables the timeout.
    pub timeout_ms: Option<u64>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            walk: WalkConfig::default(),
            max_transfers: DEFAULT_K_MAX,
            same_stop_transfer_seconds: 0,
            timeout_ms: None,
        }
    }
}
