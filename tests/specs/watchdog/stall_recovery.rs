// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stall recovery specs
//!
//! A job whose record sits unchanged for a whole interval gets kicked; a job
//! that moves only refreshes the snapshot.

use crate::prelude::*;

#[tokio::test]
async fn unchanged_processing_job_is_kicked_once() {
    let s = Scenario::seeded(snapshot_of([record("job_1", JobStatus::Processing, "A")]));
    s.job("job_1", JobStatus::Processing, "A");

    let outcome = s.watchdog.run_cycle().await;

    assert_eq!(outcome, CycleOutcome::Kicked(KickOutcome::Completed { processed: 1 }));
    assert_eq!(s.queue.processed(), vec![JobId::new("job_1")]);
    let calls = s.queue.calls();
    let locked = calls.iter().position(|c| *c == QueueCall::LockProcess).unwrap();
    let processed = calls.iter().position(|c| matches!(c, QueueCall::ProcessJob(_))).unwrap();
    let unlocked = calls.iter().position(|c| *c == QueueCall::UnlockProcess).unwrap();
    assert!(locked < processed && processed < unlocked);
    assert!(s.queue.lock().is_none());
}

#[tokio::test]
async fn moving_job_only_refreshes_snapshot() {
    let s = Scenario::seeded(snapshot_of([record("job_1", JobStatus::Processing, "A")]));
    let moved = s.job("job_1", JobStatus::Processing, "B");

    let outcome = s.watchdog.run_cycle().await;

    assert_eq!(outcome, CycleOutcome::SnapshotStored { jobs: 1 });
    similar_asserts::assert_eq!(s.snapshots.current(), Some(snapshot_of([moved])));
    assert!(s.queue.processed().is_empty());
}

#[tokio::test]
async fn stall_is_detected_on_the_second_cycle() {
    let s = Scenario::new();
    s.job("job_1", JobStatus::Queued, "A");

    assert_eq!(s.watchdog.run_cycle().await, CycleOutcome::SnapshotStored { jobs: 1 });
    s.clock.advance(Duration::from_secs(120));
    let second = s.watchdog.run_cycle().await;

    assert_eq!(second, CycleOutcome::Kicked(KickOutcome::Completed { processed: 1 }));
}

#[tokio::test]
async fn one_stalled_job_among_many_triggers_a_kick() {
    let s = Scenario::seeded(snapshot_of([
        record("job_1", JobStatus::Completed, "A"),
        record("job_2", JobStatus::Processing, "A"),
        record("job_3", JobStatus::Processing, "A"),
    ]));
    s.queue.set_records([
        record("job_1", JobStatus::Completed, "A"),
        record("job_2", JobStatus::Processing, "B"),
        record("job_3", JobStatus::Processing, "A"),
    ]);
    s.queue.push_pending(record("job_3", JobStatus::Processing, "A"));

    assert!(matches!(s.watchdog.run_cycle().await, CycleOutcome::Kicked(_)));
}

#[tokio::test]
async fn crashing_job_never_leaves_the_queue_locked() {
    let s = Scenario::seeded(snapshot_of([record("job_1", JobStatus::Processing, "A")]));
    s.job("job_1", JobStatus::Processing, "A");
    s.queue.set_behavior("job_1", ProcessBehavior::Panic);

    let outcome = s.watchdog.run_cycle().await;

    assert!(matches!(outcome, CycleOutcome::Failed(_)));
    assert!(s.queue.lock().is_none());
}
