// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watchdog service: registration upkeep plus the tick loop.

use crate::error::ServiceError;
use crate::reconcile::{reconcile_registration, ReconcileOutcome};
use crate::settings::{effective_limits, kicker_enabled, set_kicker_enabled, update_sync_limits};
use crate::watchdog::{CycleOutcome, Watchdog};
use kicker_adapters::{ConfigStore, Host, JobQueue, Scheduler, SchedulerError, SnapshotStore};
use kicker_core::{Clock, HookId, LimitsConfig, LimitsSubmission, RecurringTrigger};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Owns a [`Watchdog`] and the collaborators that decide when it runs.
pub struct WatchdogService<Q, S, C> {
    watchdog: Watchdog<Q, S, C>,
    scheduler: Arc<dyn Scheduler>,
    config: Arc<dyn ConfigStore>,
    host: Arc<dyn Host>,
    trigger: RecurringTrigger,
}

impl<Q, S, C> WatchdogService<Q, S, C>
where
    Q: JobQueue,
    S: SnapshotStore,
    C: Clock,
{
    pub fn new(
        watchdog: Watchdog<Q, S, C>,
        scheduler: Arc<dyn Scheduler>,
        config: Arc<dyn ConfigStore>,
        host: Arc<dyn Host>,
    ) -> Self {
        Self { watchdog, scheduler, config, host, trigger: RecurringTrigger::kicker() }
    }

    /// Use a trigger other than the default kicker hook.
    pub fn with_trigger(mut self, trigger: RecurringTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn watchdog(&self) -> &Watchdog<Q, S, C> {
        &self.watchdog
    }

    pub fn trigger(&self) -> &RecurringTrigger {
        &self.trigger
    }

    pub fn is_enabled(&self) -> bool {
        kicker_enabled(self.config.as_ref())
    }

    /// Align scheduler registrations with the toggle and host availability.
    pub fn reconcile(&self) -> Result<ReconcileOutcome, SchedulerError> {
        reconcile_registration(
            self.scheduler.as_ref(),
            &self.trigger,
            self.is_enabled(),
            self.host.queue_available(),
        )
    }

    /// Store the toggle and reconcile right away.
    pub fn set_enabled(&self, submitted: Option<&str>) -> Result<&'static str, ServiceError> {
        let message = set_kicker_enabled(self.config.as_ref(), submitted)?;
        self.reconcile()?;
        Ok(message)
    }

    pub fn update_limits(&self, submission: &LimitsSubmission) -> Result<&'static str, ServiceError> {
        Ok(update_sync_limits(self.config.as_ref(), submission, self.host.execution_limit_secs())?)
    }

    pub fn limits(&self) -> LimitsConfig {
        effective_limits(self.config.as_ref(), self.host.execution_limit_secs())
    }

    /// Run one cycle with the currently effective burst window.
    pub async fn tick(&mut self) -> CycleOutcome {
        let time_limit = Duration::from_secs(self.limits().default_time_limit);
        if self.watchdog.config().time_limit != time_limit {
            let config = self.watchdog.config().clone().time_limit(time_limit);
            self.watchdog.set_config(config);
        }
        self.watchdog.run_cycle().await
    }

    /// Reconcile, then run a cycle per tick for our hook until `cancel` fires
    /// or the tick channel closes. Registrations are removed on the way out.
    ///
    /// Cancelling mid-cycle abandons the cycle; a held process lock is
    /// released in the background.
    pub async fn run(&mut self, mut ticks: mpsc::Receiver<HookId>, cancel: CancellationToken) {
        match self.reconcile() {
            Ok(outcome) => tracing::info!(
                hook = %self.trigger.hook,
                outcome = %outcome,
                "watchdog registration reconciled"
            ),
            Err(e) => tracing::error!(error = %e, "watchdog registration failed"),
        }

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("watchdog shutting down");
                    break;
                }
                hook = ticks.recv() => {
                    let Some(hook) = hook else {
                        tracing::info!("tick channel closed, watchdog stopping");
                        break;
                    };
                    if hook != self.trigger.hook {
                        tracing::debug!(hook = %hook, "ignoring tick for another hook");
                        continue;
                    }
                    tokio::select! {
                        outcome = self.tick() => tracing::info!(outcome = %outcome, "watchdog tick"),
                        _ = cancel.cancelled() => {
                            tracing::info!("watchdog shutting down mid-cycle");
                            break;
                        }
                    }
                }
            }
        }

        let removed = self.scheduler.unschedule_all(&self.trigger.hook);
        tracing::debug!(removed, "watchdog registrations removed");
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
