//! Shared application state: the current timetable snapshot behind a
//! read-copy-update lock, plus the configuration every handler needs.
//!
//! A `TransitModel` is build-once and immutable (§5); reloading the feed
//! builds a new one and swaps it in under the write lock, while in-flight
//! queries that already cloned the `Arc` keep running against the old one
//! to completion.

use std::path::PathBuf;
use std::sync::Arc;

use raptor_core::config::SearchOptions;
use raptor_core::TransitModel;
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::snapshot::{Snapshot, SnapshotError};

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<RwLock<Option<Arc<TransitModel>>>>,
    pub snapshot_path: PathBuf,
    pub default_search_options: SearchOptions,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            model: Arc::new(RwLock::new(None)),
            snapshot_path: config.timetable_snapshot_path.clone(),
            default_search_options: config.search_options(),
        }
    }

    /// Loads the configured snapshot file and publishes the resulting model,
    /// replacing whatever was previously loaded.
    pub async fn reload(&self) -> Result<(), ReloadError> {
        let snapshot = Snapshot::load(&self.snapshot_path)?;
        let built = TransitModel::build(&snapshot)?;
        let mut guard = self.model.write().await;
        *guard = Some(Arc::new(built));
        Ok(())
    }

    /// The currently published model, or `None` if no snapshot has loaded
    /// successfully yet.
    pub async fn current(&self) -> Option<Arc<TransitModel>> {
        self.model.read().await.clone()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Build(#[from] raptor_core::BuildError),
}
