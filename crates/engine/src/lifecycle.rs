// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process lifecycle: wire state files, the interval scheduler and the host
//! into a running watchdog, then run it until shutdown.

use crate::env::{self, EnvError, StatePaths};
use crate::logging::{init_logging, LoggingError};
use crate::service::WatchdogService;
use crate::settings::effective_limits;
use crate::watchdog::Watchdog;
use kicker_adapters::{Host, IntervalScheduler, JobQueue};
use kicker_core::{HookId, SystemClock};
use kicker_storage::{FileSnapshotStore, JsonConfigStore, StorageError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Pending ticks buffered between the timer tasks and the cycle loop.
const TICK_BUFFER: usize = 8;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Env(#[from] EnvError),
    #[error("cannot open state: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
}

/// Host whose execution ceiling comes from `KICKER_MAX_EXECUTION_TIME`.
#[derive(Debug, Clone, Copy)]
pub struct EnvHost {
    queue_available: bool,
}

impl EnvHost {
    pub fn new(queue_available: bool) -> Self {
        Self { queue_available }
    }
}

impl Host for EnvHost {
    fn queue_available(&self) -> bool {
        self.queue_available
    }

    fn execution_limit_secs(&self) -> Option<u64> {
        env::host_execution_limit()
    }
}

/// A watchdog backed by files under a state directory.
pub struct Kicker<Q: JobQueue> {
    service: WatchdogService<Q, FileSnapshotStore, SystemClock>,
    ticks: mpsc::Receiver<HookId>,
    config: Arc<JsonConfigStore>,
}

impl<Q: JobQueue> Kicker<Q> {
    /// Open the stores under `paths` and build the service around `queue`.
    pub fn startup(
        queue: Q,
        host: Arc<dyn Host>,
        paths: &StatePaths,
    ) -> Result<Self, LifecycleError> {
        let config = Arc::new(JsonConfigStore::open(&paths.config)?);
        let limits = effective_limits(config.as_ref(), host.execution_limit_secs());
        let watchdog = Watchdog::new(
            queue,
            FileSnapshotStore::new(&paths.snapshot),
            SystemClock,
            env::watchdog_config(&limits),
        );
        let (scheduler, ticks) = IntervalScheduler::new(TICK_BUFFER);
        let service = WatchdogService::new(watchdog, Arc::new(scheduler), config.clone(), host);

        tracing::info!(
            config = %paths.config.display(),
            snapshot = %paths.snapshot.display(),
            time_limit_secs = limits.default_time_limit,
            "kicker started"
        );
        Ok(Self { service, ticks, config })
    }

    /// [`startup`](Self::startup) with paths and host taken from the environment.
    pub fn from_env(queue: Q, queue_available: bool) -> Result<Self, LifecycleError> {
        let paths = StatePaths::resolve()?;
        Self::startup(queue, Arc::new(EnvHost::new(queue_available)), &paths)
    }

    pub fn config(&self) -> &JsonConfigStore {
        &self.config
    }

    /// Operator actions (toggle, limits) go through here.
    pub fn service(&self) -> &WatchdogService<Q, FileSnapshotStore, SystemClock> {
        &self.service
    }

    pub async fn run(self, cancel: CancellationToken) {
        let Self { mut service, ticks, .. } = self;
        service.run(ticks, cancel).await;
        tracing::info!("kicker stopped");
    }
}

/// Install file logging, start from the environment, and run until `cancel`.
///
/// An already-installed subscriber is kept as is.
pub async fn run_from_env<Q: JobQueue>(
    queue: Q,
    queue_available: bool,
    cancel: CancellationToken,
) -> Result<(), LifecycleError> {
    let paths = StatePaths::resolve()?;
    let _logging = match init_logging(&paths.logs) {
        Ok(guard) => Some(guard),
        Err(LoggingError::AlreadyInstalled) => {
            tracing::debug!("subscriber already installed, not adding file logging");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let kicker = Kicker::startup(queue, Arc::new(EnvHost::new(queue_available)), &paths)?;
    kicker.run(cancel).await;
    Ok(())
}

/// [`run_from_env`] until ctrl-c.
pub async fn run_until_ctrl_c<Q: JobQueue>(
    queue: Q,
    queue_available: bool,
) -> Result<(), LifecycleError> {
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("interrupt received");
                on_signal.cancel();
            }
            Err(e) => tracing::warn!(error = %e, "cannot listen for ctrl-c"),
        }
    });
    run_from_env(queue, queue_available, cancel).await
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
