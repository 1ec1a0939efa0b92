// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-slot storage for the last observed snapshot.

use async_trait::async_trait;
use kicker_core::Snapshot;
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

/// Errors from snapshot slot operations
#[derive(Debug, Error)]
pub enum SnapshotStoreError {
    #[error("snapshot slot I/O error: {0}")]
    Io(String),
}

/// The slot holding the previous cycle's snapshot.
///
/// Storing overwrites; there is never more than one snapshot.
#[async_trait]
pub trait SnapshotStore: Clone + Send + Sync + 'static {
    async fn load(&self) -> Result<Option<Snapshot>, SnapshotStoreError>;
    async fn store(&self, snapshot: &Snapshot) -> Result<(), SnapshotStoreError>;
}

/// Snapshot slot held in process memory.
#[derive(Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Arc<Mutex<Option<Snapshot>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self { slot: Arc::new(Mutex::new(Some(snapshot))) }
    }

    /// Current slot contents without going through the trait.
    pub fn current(&self) -> Option<Snapshot> {
        self.slot.lock().clone()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> Result<Option<Snapshot>, SnapshotStoreError> {
        Ok(self.slot.lock().clone())
    }

    async fn store(&self, snapshot: &Snapshot) -> Result<(), SnapshotStoreError> {
        *self.slot.lock() = Some(snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
