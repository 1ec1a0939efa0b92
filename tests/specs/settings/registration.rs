// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recurring registration specs
//!
//! Exactly one registration while the kicker is on and the queue exists.

use crate::prelude::*;
use kicker_adapters::IntervalScheduler;
use kicker_engine::{reconcile_registration, ReconcileOutcome, WatchdogService};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[test]
fn reconcile_converges_to_one_registration() {
    let trigger = RecurringTrigger::kicker();

    let none = FakeScheduler::new();
    let added = reconcile_registration(&none, &trigger, true, true).unwrap();
    assert_eq!(added, ReconcileOutcome::Added);
    assert_eq!(none.registrations(&trigger.hook).len(), 1);

    let two = FakeScheduler::with_registrations(&trigger, 2);
    reconcile_registration(&two, &trigger, true, true).unwrap();
    assert_eq!(two.registrations(&trigger.hook).len(), 1);

    let one = FakeScheduler::with_registrations(&trigger, 1);
    reconcile_registration(&one, &trigger, false, true).unwrap();
    assert!(one.registrations(&trigger.hook).is_empty());
}

#[tokio::test(start_paused = true)]
async fn interval_ticks_drive_detection_then_kick() {
    let s = Scenario::new();
    s.job("job_1", JobStatus::Processing, "A");
    let (scheduler, ticks) = IntervalScheduler::new(4);
    let config = MemoryConfigStore::with_values([("kicker_enabled", "on")]);
    let mut service = WatchdogService::new(
        s.watchdog.clone(),
        Arc::new(scheduler.clone()),
        Arc::new(config),
        Arc::new(StaticHost::new(true, None)),
    );
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    let handle = tokio::spawn(async move { service.run(ticks, token).await });

    // First tick fires immediately and only records the snapshot
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(s.snapshots.current().is_some());
    assert!(s.queue.processed().is_empty());

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(s.queue.processed(), vec![JobId::new("job_1")]);

    cancel.cancel();
    handle.await.unwrap();
    assert!(scheduler.registrations(&RecurringTrigger::kicker().hook).is_empty());
}

#[tokio::test]
async fn disabled_kicker_never_registers() {
    let s = Scenario::new();
    let (scheduler, ticks) = IntervalScheduler::new(1);
    let mut service = WatchdogService::new(
        s.watchdog.clone(),
        Arc::new(scheduler.clone()),
        Arc::new(MemoryConfigStore::new()),
        Arc::new(StaticHost::new(true, None)),
    );
    let cancel = CancellationToken::new();
    cancel.cancel();

    service.run(ticks, cancel).await;

    assert!(s.queue.calls().is_empty());
    assert!(scheduler.registrations(&RecurringTrigger::kicker().hook).is_empty());
}
