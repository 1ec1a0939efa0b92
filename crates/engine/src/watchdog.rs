// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stall watchdog.
//!
//! Each cycle compares the queue's job records with the snapshot taken on
//! the previous cycle. An active job whose record has not changed in a full
//! interval is stalled; the watchdog then runs a processing burst itself
//! unless a live process still holds the queue.

use crate::error::WatchdogError;
use crate::kick::{process_one_cycle, KickLimits, KickOutcome};
use kicker_adapters::{JobQueue, SnapshotStore};
use kicker_core::{find_stalled, short, Clock, LimitsConfig, LockAge, Snapshot, LOCK_STALE_AFTER};
use std::time::Duration;

/// Jobs run per burst before handing back to the queue's dispatch.
pub const DEFAULT_MAX_JOBS_PER_KICK: usize = 5;

/// Parameters of a watchdog cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchdogConfig {
    /// Lock age past which the holder is presumed dead
    pub lock_stale_after: Duration,
    /// Wall-clock budget for a burst
    pub time_limit: Duration,
    pub max_jobs_per_kick: usize,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self::from_limits(&LimitsConfig::defaults(kicker_core::BASE_TIME_LIMIT_SECS))
    }
}

impl WatchdogConfig {
    /// Config whose burst window is the effective `default_time_limit`.
    pub fn from_limits(limits: &LimitsConfig) -> Self {
        Self {
            lock_stale_after: LOCK_STALE_AFTER,
            time_limit: Duration::from_secs(limits.default_time_limit),
            max_jobs_per_kick: DEFAULT_MAX_JOBS_PER_KICK,
        }
    }

    kicker_core::setters! {
        set {
            lock_stale_after: Duration,
            time_limit: Duration,
            max_jobs_per_kick: usize,
        }
    }

    fn kick_limits(&self) -> KickLimits {
        KickLimits { time_limit: self.time_limit, max_jobs: self.max_jobs_per_kick.max(1) }
    }
}

/// What a cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No job records exist
    Idle,
    /// No stall; the current records became the new snapshot
    SnapshotStored { jobs: usize },
    /// Stall found but a live process holds the lock
    Suppressed { holder: String, age: Duration },
    /// Stall found and a burst ran
    Kicked(KickOutcome),
    /// The cycle hit an error and was abandoned
    Failed(String),
}

kicker_core::simple_display! {
    CycleOutcome {
        Idle => "idle",
        SnapshotStored { .. } => "snapshot stored",
        Suppressed { .. } => "suppressed",
        Kicked(..) => "kicked",
        Failed(..) => "failed",
    }
}

/// Watches one queue and kicks it when it stalls.
#[derive(Clone)]
pub struct Watchdog<Q, S, C> {
    queue: Q,
    snapshots: S,
    clock: C,
    config: WatchdogConfig,
}

impl<Q, S, C> Watchdog<Q, S, C>
where
    Q: JobQueue,
    S: SnapshotStore,
    C: Clock,
{
    pub fn new(queue: Q, snapshots: S, clock: C, config: WatchdogConfig) -> Self {
        Self { queue, snapshots, clock, config }
    }

    pub fn config(&self) -> &WatchdogConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: WatchdogConfig) {
        self.config = config;
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    /// Run one cycle. Never fails; errors are logged and reported as
    /// [`CycleOutcome::Failed`].
    pub async fn run_cycle(&self) -> CycleOutcome {
        match self.try_cycle().await {
            Ok(outcome) => {
                tracing::debug!(outcome = %outcome, "watchdog cycle finished");
                outcome
            }
            Err(e) => {
                tracing::error!(error = %e, "watchdog cycle failed");
                CycleOutcome::Failed(e.to_string())
            }
        }
    }

    async fn try_cycle(&self) -> Result<CycleOutcome, WatchdogError> {
        let records = self.queue.job_records().await.map_err(WatchdogError::Listing)?;
        if records.is_empty() {
            tracing::debug!("no job records, nothing to watch");
            return Ok(CycleOutcome::Idle);
        }
        let current = Snapshot::from_records(records);

        let previous = match self.snapshots.load().await {
            Ok(previous) => previous,
            Err(e) => {
                tracing::warn!(error = %e, "could not load previous snapshot, treating as none");
                None
            }
        };

        let Some(stalled) = find_stalled(previous.as_ref(), &current) else {
            self.snapshots.store(&current).await?;
            tracing::debug!(jobs = current.len(), "snapshot stored");
            return Ok(CycleOutcome::SnapshotStored { jobs: current.len() });
        };
        tracing::info!(
            job_id = %stalled.id,
            status = %stalled.status,
            "job unchanged since last cycle, queue looks stalled"
        );

        if let Some(lock) = self.queue.process_lock().await.map_err(WatchdogError::Lock)? {
            match lock.classify(self.clock.epoch_secs(), self.config.lock_stale_after) {
                LockAge::Fresh(age) => {
                    tracing::info!(
                        holder = %lock.holder,
                        age_secs = age.as_secs(),
                        "process lock is fresh, not kicking"
                    );
                    return Ok(CycleOutcome::Suppressed { holder: lock.holder, age });
                }
                LockAge::Stale(age) => {
                    tracing::info!(
                        holder = %lock.holder,
                        age_secs = age.as_secs(),
                        "process lock is stale, clearing"
                    );
                    self.queue.clear_process_lock().await.map_err(WatchdogError::Lock)?;
                }
                LockAge::Unknown => {
                    let marker = lock.to_string();
                    tracing::warn!(
                        marker = %short(&marker, 64),
                        "process lock has no readable timestamp, clearing"
                    );
                    self.queue.clear_process_lock().await.map_err(WatchdogError::Lock)?;
                }
            }
        }

        let ids: Vec<&str> = current.ids().map(|id| id.as_str()).collect();
        tracing::info!(jobs = ?ids, "kicking stalled queue");

        let outcome = process_one_cycle(&self.queue, &self.config.kick_limits()).await?;
        tracing::info!(outcome = %outcome, "kick finished");
        Ok(CycleOutcome::Kicked(outcome))
    }
}

#[cfg(test)]
#[path = "watchdog_tests.rs"]
mod tests;
