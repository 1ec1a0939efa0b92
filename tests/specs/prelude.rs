// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared wiring for the specs.

#![allow(dead_code, unused_imports)]

pub use kicker_adapters::{
    FakeJobQueue, FakeScheduler, MemoryConfigStore, MemorySnapshotStore, ProcessBehavior, QueueCall,
    Scheduler, SnapshotStore, StaticHost,
};
pub use kicker_core::test_support::{record, snapshot_of};
pub use kicker_core::{FakeClock, JobId, JobStatus, ProcessLock, RecurringTrigger, Snapshot};
pub use kicker_engine::{CycleOutcome, KickOutcome, Watchdog, WatchdogConfig};
pub use std::time::Duration;

/// Wall clock used by every scenario, in unix seconds.
pub const NOW: u64 = 1_700_000_000;

pub fn clock() -> FakeClock {
    let clock = FakeClock::new();
    clock.set_epoch_secs(NOW);
    clock
}

/// A queue with a stalled-looking job and the watchdog watching it.
pub struct Scenario<S: SnapshotStore> {
    pub queue: FakeJobQueue,
    pub snapshots: S,
    pub clock: FakeClock,
    pub watchdog: Watchdog<FakeJobQueue, S, FakeClock>,
}

impl<S: SnapshotStore> Scenario<S> {
    pub fn with_store(snapshots: S) -> Self {
        let clock = clock();
        let queue = FakeJobQueue::with_clock(clock.clone());
        let watchdog = Watchdog::new(
            queue.clone(),
            snapshots.clone(),
            clock.clone(),
            WatchdogConfig::default(),
        );
        Self { queue, snapshots, clock, watchdog }
    }

    /// Persist `job` and leave it pending in the queue.
    pub fn job(&self, id: &str, status: JobStatus, cursor: &str) -> kicker_core::JobRecord {
        let job = record(id, status, cursor);
        self.queue.set_records([job.clone()]);
        self.queue.push_pending(job.clone());
        job
    }

    pub fn lock_aged(&self, secs: u64) {
        self.queue.set_lock(Some(ProcessLock::new("worker-7", NOW - secs)));
    }
}

impl Scenario<MemorySnapshotStore> {
    pub fn new() -> Self {
        Self::with_store(MemorySnapshotStore::new())
    }

    pub fn seeded(previous: Snapshot) -> Self {
        Self::with_store(MemorySnapshotStore::with_snapshot(previous))
    }
}
