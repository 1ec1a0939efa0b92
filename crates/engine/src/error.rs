// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine error types

use kicker_adapters::{QueueError, SnapshotStoreError};
use kicker_core::JobId;
use std::time::Duration;
use thiserror::Error;

/// Errors from a manual processing burst
#[derive(Debug, Error)]
pub enum KickError {
    #[error(transparent)]
    Queue(#[from] QueueError),
    #[error("job {id} did not finish within {budget:?}")]
    TimedOut { id: JobId, budget: Duration },
    #[error("burst window of {budget:?} closed while waiting on the queue")]
    WindowClosed { budget: Duration },
    #[error("job {id} panicked: {message}")]
    Panicked { id: JobId, message: String },
}

/// Errors that end a watchdog cycle early
#[derive(Debug, Error)]
pub enum WatchdogError {
    #[error("could not list job records: {0}")]
    Listing(#[source] QueueError),
    #[error("could not inspect process lock: {0}")]
    Lock(#[source] QueueError),
    #[error("could not store snapshot: {0}")]
    Snapshot(#[from] SnapshotStoreError),
    #[error("kick failed: {0}")]
    Kick(#[from] KickError),
}

/// Errors from operator actions on the service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Config(#[from] kicker_adapters::ConfigError),
    #[error(transparent)]
    Scheduler(#[from] kicker_adapters::SchedulerError),
}
