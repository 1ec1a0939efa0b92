// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use kicker_adapters::{FakeJobQueue, ProcessBehavior, QueueCall};
use kicker_core::test_support::record;
use kicker_core::{JobStatus, ProcessLock};

fn limits(max_jobs: usize) -> KickLimits {
    KickLimits { time_limit: Duration::from_secs(20), max_jobs }
}

fn queue_with(ids: &[&str]) -> FakeJobQueue {
    let queue = FakeJobQueue::new();
    for id in ids {
        queue.push_pending(record(id, JobStatus::Processing, "A"));
    }
    queue
}

#[tokio::test]
async fn running_process_is_left_alone() {
    let queue = queue_with(&["job_1"]);
    queue.set_lock(Some(ProcessLock::new("worker-7", 1_700_000_000)));

    let outcome = process_one_cycle(&queue, &limits(5)).await.unwrap();

    assert_eq!(outcome, KickOutcome::AlreadyRunning);
    assert_eq!(queue.calls(), vec![QueueCall::IsProcessRunning]);
    assert_eq!(queue.lock().map(|l| l.holder), Some("worker-7".to_string()));
}

#[tokio::test]
async fn empty_queue_is_not_locked() {
    let queue = FakeJobQueue::new();

    let outcome = process_one_cycle(&queue, &limits(5)).await.unwrap();

    assert_eq!(outcome, KickOutcome::QueueEmpty);
    assert_eq!(queue.count(&QueueCall::LockProcess), 0);
}

#[tokio::test]
async fn single_job_runs_under_lock_then_completes() {
    let queue = queue_with(&["job_1"]);

    let outcome = process_one_cycle(&queue, &limits(5)).await.unwrap();

    assert_eq!(outcome, KickOutcome::Completed { processed: 1 });
    assert_eq!(
        queue.calls(),
        vec![
            QueueCall::IsProcessRunning,
            QueueCall::IsQueueEmpty,
            QueueCall::LockProcess,
            QueueCall::GetJob,
            QueueCall::ProcessJob(JobId::new("job_1")),
            QueueCall::UnlockProcess,
            QueueCall::IsQueueEmpty,
            QueueCall::Complete,
        ]
    );
    assert!(queue.lock().is_none());
}

#[tokio::test]
async fn drains_several_jobs_one_lock_each() {
    let queue = queue_with(&["job_1", "job_2", "job_3"]);

    let outcome = process_one_cycle(&queue, &limits(5)).await.unwrap();

    assert_eq!(outcome, KickOutcome::Completed { processed: 3 });
    assert_eq!(queue.processed(), vec![JobId::new("job_1"), JobId::new("job_2"), JobId::new("job_3")]);
    assert_eq!(queue.count(&QueueCall::LockProcess), 3);
    assert_eq!(queue.count(&QueueCall::UnlockProcess), 3);
}

#[tokio::test]
async fn job_cap_hands_back_to_dispatch() {
    let queue = queue_with(&["job_1", "job_2", "job_3"]);

    let outcome = process_one_cycle(&queue, &limits(2)).await.unwrap();

    assert_eq!(outcome, KickOutcome::Dispatched { processed: 2 });
    assert_eq!(queue.pending_len(), 1);
    assert_eq!(queue.count(&QueueCall::Dispatch), 1);
    assert_eq!(queue.count(&QueueCall::Complete), 0);
    assert!(queue.lock().is_none());
}

#[tokio::test]
async fn failing_job_releases_lock() {
    let queue = queue_with(&["job_1"]);
    queue.set_behavior("job_1", ProcessBehavior::Fail("api timeout".into()));

    let err = process_one_cycle(&queue, &limits(5)).await.unwrap_err();

    assert!(matches!(err, KickError::Queue(QueueError::JobFailed { .. })));
    assert!(queue.lock().is_none());
    assert_eq!(queue.count(&QueueCall::UnlockProcess), 1);
    assert_eq!(queue.count(&QueueCall::Dispatch), 0);
}

#[tokio::test]
async fn panicking_job_releases_lock() {
    let queue = queue_with(&["job_1"]);
    queue.set_behavior("job_1", ProcessBehavior::Panic);

    let err = process_one_cycle(&queue, &limits(5)).await.unwrap_err();

    match err {
        KickError::Panicked { id, message } => {
            assert_eq!(id, "job_1");
            assert_eq!(message, "job job_1 crashed");
        }
        other => panic!("expected panic error, got {other:?}"),
    }
    assert!(queue.lock().is_none());
}

#[tokio::test(start_paused = true)]
async fn hung_job_times_out_and_releases_lock() {
    let queue = queue_with(&["job_1"]);
    queue.set_behavior("job_1", ProcessBehavior::Hang);

    let err = process_one_cycle(&queue, &limits(5)).await.unwrap_err();

    match err {
        KickError::TimedOut { id, budget } => {
            assert_eq!(id, "job_1");
            assert_eq!(budget, Duration::from_secs(20));
        }
        other => panic!("expected timeout, got {other:?}"),
    }
    assert!(queue.lock().is_none());
}

#[tokio::test(start_paused = true)]
async fn wedged_queue_call_cannot_hold_lock_past_window() {
    let queue = queue_with(&["job_1"]);
    queue.hang_get_job();
    let started = Instant::now();

    let result =
        tokio::time::timeout(Duration::from_secs(200), process_one_cycle(&queue, &limits(5))).await;

    let err = result.expect("burst must end within its window").unwrap_err();
    assert!(matches!(err, KickError::WindowClosed { budget } if budget == Duration::from_secs(20)));
    assert!(started.elapsed() <= Duration::from_secs(21));
    for _ in 0..3 {
        tokio::task::yield_now().await;
    }
    assert!(queue.lock().is_none());
    assert_eq!(queue.count(&QueueCall::UnlockProcess), 1);
    assert!(queue.processed().is_empty());
}

#[tokio::test]
async fn dropped_guard_releases_lock_in_background() {
    let queue = FakeJobQueue::new();
    let guard = ProcessLockGuard::acquire(queue.clone()).await.unwrap();
    assert!(queue.lock().is_some());

    drop(guard);
    for _ in 0..3 {
        tokio::task::yield_now().await;
    }

    assert!(queue.lock().is_none());
    assert_eq!(queue.count(&QueueCall::UnlockProcess), 1);
}

#[tokio::test]
async fn released_guard_unlocks_once() {
    let queue = FakeJobQueue::new();
    let guard = ProcessLockGuard::acquire(queue.clone()).await.unwrap();

    guard.release().await;
    tokio::task::yield_now().await;

    assert_eq!(queue.count(&QueueCall::UnlockProcess), 1);
}

#[yare::parameterized(
    already_running = { KickOutcome::AlreadyRunning, "already running" },
    completed = { KickOutcome::Completed { processed: 2 }, "completed" },
    dispatched = { KickOutcome::Dispatched { processed: 5 }, "dispatched" },
)]
fn outcome_display(outcome: KickOutcome, expected: &str) {
    assert_eq!(outcome.to_string(), expected);
}
