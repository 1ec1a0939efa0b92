// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed snapshot specs
//!
//! The snapshot outlives the process, so a stall spanning a restart is
//! still detected.

use crate::prelude::*;
use kicker_storage::FileSnapshotStore;

#[tokio::test]
async fn stall_spanning_a_restart_is_kicked() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");

    let before = Scenario::with_store(FileSnapshotStore::new(&path));
    before.queue.set_records([record("job_1", JobStatus::Processing, "A")]);
    assert_eq!(before.watchdog.run_cycle().await, CycleOutcome::SnapshotStored { jobs: 1 });
    assert!(path.exists());

    let after = Scenario::with_store(FileSnapshotStore::new(&path));
    after.job("job_1", JobStatus::Processing, "A");

    let outcome = after.watchdog.run_cycle().await;
    assert_eq!(outcome, CycleOutcome::Kicked(KickOutcome::Completed { processed: 1 }));
}

#[tokio::test]
async fn corrupt_snapshot_costs_one_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, b"{not json").unwrap();

    let s = Scenario::with_store(FileSnapshotStore::new(&path));
    s.job("job_1", JobStatus::Processing, "A");

    assert_eq!(s.watchdog.run_cycle().await, CycleOutcome::SnapshotStored { jobs: 1 });
    let stored = s.snapshots.load().await.unwrap();
    similar_asserts::assert_eq!(
        stored,
        Some(snapshot_of([record("job_1", JobStatus::Processing, "A")]))
    );
    assert!(matches!(s.watchdog.run_cycle().await, CycleOutcome::Kicked(_)));
}
