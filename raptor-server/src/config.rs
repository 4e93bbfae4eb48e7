//! Server configuration: a small TOML-backed record, loaded once at
//! startup. No process-wide mutable configuration state — everything here
//! is threaded explicitly into [`crate::state::AppState`] and the query
//! options passed to `raptor_core::query::search_cancellable`.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use raptor_core::config::{SearchOptions, WalkConfig};
use serde::Deserialize;

/// On-disk configuration, deserialised with `toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub timetable_snapshot_path: PathBuf,
    pub max_walk_radius_m: f64,
    pub walk_speed_mps: f64,
    pub walk_penalty: f64,
    pub max_transfers: usize,
    pub same_stop_transfer_seconds: u32,
    pub timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let walk = WalkConfig::default();
        let search = SearchOptions::default();
        Self {
            listen_addr: "0.0.0.0:3000".parse().unwrap(),
            timetable_snapshot_path: PathBuf::from("timetable.json"),
            max_walk_radius_m: walk.max_walk_radius_m,
            walk_speed_mps: walk.walk_speed_mps,
            walk_penalty: walk.walk_penalty,
            max_transfers: search.max_transfers,
            same_stop_transfer_seconds: search.same_stop_transfer_seconds,
            timeout_ms: 5_000,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file, falling back to defaults for
    /// any field the file omits. Missing file is not an error: an absent
    /// config simply means "run with every default".
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_owned(), e))?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse(path.to_owned(), e))
    }

    #[must_use]
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            walk: WalkConfig {
                max_walk_radius_m: self.max_walk_radius_m,
                walk_speed_mps: self.walk_speed_mps,
                walk_penalty: self.walk_penalty,
            },
            max_transfers: self.max_transfers,
            same_stop_transfer_seconds: self.same_stop_transfer_seconds,
            timeout_ms: Some(self.timeout_ms),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}
