// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot slot persisted as a single JSON file.
//!
//! Each cycle that does not kick overwrites the file. A file that cannot be
//! read back (corrupt, or written by another schema version) is moved aside
//! and reported as "no previous snapshot", which only costs one cycle of
//! detection.

use crate::fs::{quarantine, write_atomic, StorageError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kicker_adapters::{SnapshotStore, SnapshotStoreError};
use kicker_core::Snapshot;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current snapshot schema version
pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

/// On-disk envelope around a [`Snapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// Schema version
    #[serde(rename = "v")]
    pub version: u32,
    /// When this snapshot was taken
    pub created_at: DateTime<Utc>,
    pub jobs: Snapshot,
}

impl SnapshotFile {
    pub fn new(jobs: Snapshot) -> Self {
        Self { version: CURRENT_SNAPSHOT_VERSION, created_at: Utc::now(), jobs }
    }
}

/// Snapshot slot stored at a fixed path.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> Result<Option<SnapshotFile>, StorageError> {
        match std::fs::read(path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> Result<Option<Snapshot>, SnapshotStoreError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || match FileSnapshotStore::read(&path) {
            Ok(Some(file)) if file.version == CURRENT_SNAPSHOT_VERSION => Ok(Some(file.jobs)),
            Ok(Some(file)) => {
                tracing::warn!(version = file.version, "snapshot from another schema version, discarding");
                quarantine(&path);
                Ok(None)
            }
            Ok(None) => Ok(None),
            Err(StorageError::Json(e)) => {
                tracing::warn!(path = %path.display(), error = %e, "snapshot file corrupt, discarding");
                quarantine(&path);
                Ok(None)
            }
            Err(StorageError::Io(e)) => Err(SnapshotStoreError::Io(e.to_string())),
        })
        .await
        .map_err(|e| SnapshotStoreError::Io(e.to_string()))?
    }

    async fn store(&self, snapshot: &Snapshot) -> Result<(), SnapshotStoreError> {
        let path = self.path.clone();
        let file = SnapshotFile::new(snapshot.clone());
        tokio::task::spawn_blocking(move || {
            let bytes = serde_json::to_vec(&file)?;
            write_atomic(&path, &bytes)
        })
        .await
        .map_err(|e| SnapshotStoreError::Io(e.to_string()))?
        .map_err(|e| SnapshotStoreError::Io(e.to_string()))
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
