// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recurring-trigger registrations.
//!
//! A scheduler only fires hooks. Whoever receives a hook decides what runs;
//! the scheduler never calls into the watchdog directly.

use kicker_core::{HookId, RecurringTrigger};
use parking_lot::{Mutex, MutexGuard};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Errors from scheduler operations
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("no async runtime available to drive '{0}'")]
    NoRuntime(HookId),
}

/// One pending recurring registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: u64,
    pub trigger: RecurringTrigger,
}

/// Registry of recurring triggers.
pub trait Scheduler: Send + Sync {
    /// Pending registrations for `hook`.
    fn registrations(&self, hook: &HookId) -> Vec<Registration>;

    /// Add a recurring registration whose first run is immediate.
    fn schedule_recurring(&self, trigger: &RecurringTrigger) -> Result<Registration, SchedulerError>;

    /// Remove every registration for `hook`, returning how many were removed.
    fn unschedule_all(&self, hook: &HookId) -> usize;
}

struct Scheduled {
    registration: Registration,
    task: JoinHandle<()>,
}

/// In-process scheduler driven by tokio interval timers.
///
/// Each registration runs its own timer task that sends the hook on the tick
/// channel. Missed ticks are skipped rather than bunched up.
#[derive(Clone)]
pub struct IntervalScheduler {
    ticks: mpsc::Sender<HookId>,
    scheduled: Arc<Mutex<BTreeMap<u64, Scheduled>>>,
    next_id: Arc<Mutex<u64>>,
}

impl IntervalScheduler {
    /// Create a scheduler and the receiving end of its tick channel.
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<HookId>) {
        let (ticks, rx) = mpsc::channel(buffer.max(1));
        let scheduler = Self {
            ticks,
            scheduled: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(Mutex::new(1)),
        };
        (scheduler, rx)
    }

    /// Drop entries whose timer task has stopped, returning the live map.
    fn live(&self) -> MutexGuard<'_, BTreeMap<u64, Scheduled>> {
        let mut scheduled = self.scheduled.lock();
        scheduled.retain(|_, s| !s.task.is_finished());
        scheduled
    }

    fn allocate_id(&self) -> u64 {
        let mut next = self.next_id.lock();
        let id = *next;
        *next += 1;
        id
    }
}

impl Scheduler for IntervalScheduler {
    fn registrations(&self, hook: &HookId) -> Vec<Registration> {
        self.live()
            .values()
            .filter(|s| &s.registration.trigger.hook == hook)
            .map(|s| s.registration.clone())
            .collect()
    }

    fn schedule_recurring(&self, trigger: &RecurringTrigger) -> Result<Registration, SchedulerError> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|_| SchedulerError::NoRuntime(trigger.hook.clone()))?;

        let ticks = self.ticks.clone();
        let hook = trigger.hook.clone();
        let period = trigger.interval;
        let task = handle.spawn(async move {
            let mut timer = tokio::time::interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                timer.tick().await;
                if ticks.send(hook.clone()).await.is_err() {
                    tracing::debug!(hook = %hook, "tick receiver closed, stopping timer");
                    break;
                }
            }
        });

        let registration = Registration { id: self.allocate_id(), trigger: trigger.clone() };
        self.live().insert(registration.id, Scheduled { registration: registration.clone(), task });
        Ok(registration)
    }

    fn unschedule_all(&self, hook: &HookId) -> usize {
        let mut scheduled = self.live();
        let ids: Vec<u64> = scheduled
            .iter()
            .filter(|(_, s)| &s.registration.trigger.hook == hook)
            .map(|(id, _)| *id)
            .collect();
        for id in &ids {
            if let Some(entry) = scheduled.remove(id) {
                entry.task.abort();
            }
        }
        ids.len()
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{Registration, Scheduler, SchedulerError};
    use kicker_core::{HookId, RecurringTrigger};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded scheduler call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SchedulerCall {
        Schedule(HookId),
        UnscheduleAll(HookId),
    }

    #[derive(Default)]
    struct FakeSchedulerState {
        registrations: Vec<Registration>,
        next_id: u64,
        calls: Vec<SchedulerCall>,
    }

    /// Scheduler that only keeps a registration list.
    #[derive(Clone, Default)]
    pub struct FakeScheduler {
        inner: Arc<Mutex<FakeSchedulerState>>,
    }

    impl FakeScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed `count` registrations of `trigger` without recording calls.
        pub fn with_registrations(trigger: &RecurringTrigger, count: usize) -> Self {
            let scheduler = Self::new();
            {
                let mut state = scheduler.inner.lock();
                for _ in 0..count {
                    state.next_id += 1;
                    let id = state.next_id;
                    state.registrations.push(Registration { id, trigger: trigger.clone() });
                }
            }
            scheduler
        }

        pub fn calls(&self) -> Vec<SchedulerCall> {
            self.inner.lock().calls.clone()
        }
    }

    impl Scheduler for FakeScheduler {
        fn registrations(&self, hook: &HookId) -> Vec<Registration> {
            self.inner
                .lock()
                .registrations
                .iter()
                .filter(|r| &r.trigger.hook == hook)
                .cloned()
                .collect()
        }

        fn schedule_recurring(
            &self,
            trigger: &RecurringTrigger,
        ) -> Result<Registration, SchedulerError> {
            let mut state = self.inner.lock();
            state.calls.push(SchedulerCall::Schedule(trigger.hook.clone()));
            state.next_id += 1;
            let registration = Registration { id: state.next_id, trigger: trigger.clone() };
            state.registrations.push(registration.clone());
            Ok(registration)
        }

        fn unschedule_all(&self, hook: &HookId) -> usize {
            let mut state = self.inner.lock();
            state.calls.push(SchedulerCall::UnscheduleAll(hook.clone()));
            let before = state.registrations.len();
            state.registrations.retain(|r| &r.trigger.hook != hook);
            before - state.registrations.len()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeScheduler, SchedulerCall};

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
