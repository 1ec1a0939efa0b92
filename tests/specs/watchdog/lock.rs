// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process lock specs
//!
//! A live holder suppresses the kick; a dead one is cleared.

use crate::prelude::*;

#[tokio::test]
async fn stale_lock_is_cleared_and_queue_kicked() {
    let s = Scenario::seeded(snapshot_of([record("job_1", JobStatus::Processing, "A")]));
    s.job("job_1", JobStatus::Processing, "A");
    s.lock_aged(200);

    let outcome = s.watchdog.run_cycle().await;

    assert_eq!(outcome, CycleOutcome::Kicked(KickOutcome::Completed { processed: 1 }));
    assert_eq!(s.queue.count(&QueueCall::ClearProcessLock), 1);
    assert!(s.queue.lock().is_none());
}

#[tokio::test]
async fn fresh_lock_suppresses_and_keeps_snapshot() {
    let previous = snapshot_of([record("job_1", JobStatus::Processing, "A")]);
    let s = Scenario::seeded(previous.clone());
    s.job("job_1", JobStatus::Processing, "A");
    s.lock_aged(30);

    let outcome = s.watchdog.run_cycle().await;

    assert_eq!(
        outcome,
        CycleOutcome::Suppressed { holder: "worker-7".into(), age: Duration::from_secs(30) }
    );
    similar_asserts::assert_eq!(s.snapshots.current(), Some(previous));
    assert_eq!(s.queue.lock().map(|l| l.holder), Some("worker-7".to_string()));
}

#[tokio::test]
async fn suppressed_stall_is_kicked_once_the_lock_goes_stale() {
    let s = Scenario::seeded(snapshot_of([record("job_1", JobStatus::Processing, "A")]));
    s.job("job_1", JobStatus::Processing, "A");
    s.lock_aged(30);

    assert!(matches!(s.watchdog.run_cycle().await, CycleOutcome::Suppressed { .. }));
    s.clock.advance(Duration::from_secs(120));

    assert!(matches!(s.watchdog.run_cycle().await, CycleOutcome::Kicked(_)));
}
