// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manual processing burst.
//!
//! Runs the queue's own job handling outside its normal dispatch path:
//! re-check that nobody is processing, take the process lock, run one job,
//! release the lock, and repeat up to a bounded number of jobs inside the
//! burst window. Whatever is left is handed back to the queue's dispatch.

use crate::error::KickError;
use futures_util::FutureExt;
use kicker_adapters::{JobQueue, QueueError};
use kicker_core::JobId;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::time::Instant;

/// Bounds of one burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KickLimits {
    /// Wall-clock budget for the whole burst
    pub time_limit: Duration,
    /// Jobs to run before handing back to dispatch
    pub max_jobs: usize,
}

/// How a burst ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KickOutcome {
    /// Another process holds the queue; nothing was touched
    AlreadyRunning,
    /// Nothing pending; nothing was touched
    QueueEmpty,
    /// Queue drained and marked complete
    Completed { processed: usize },
    /// Work remains; the queue's own dispatch was asked to continue
    Dispatched { processed: usize },
    /// Another process took the lock between jobs
    Yielded { processed: usize },
}

kicker_core::simple_display! {
    KickOutcome {
        AlreadyRunning => "already running",
        QueueEmpty => "queue empty",
        Completed { .. } => "completed",
        Dispatched { .. } => "dispatched",
        Yielded { .. } => "yielded",
    }
}

/// Holds the queue's process lock and releases it on every exit path.
///
/// Call [`release`](Self::release) on the normal path. If the guard is
/// dropped instead (the burst future was cancelled), release is spawned on
/// the current runtime.
pub struct ProcessLockGuard<Q: JobQueue> {
    queue: Option<Q>,
}

impl<Q: JobQueue> ProcessLockGuard<Q> {
    pub async fn acquire(queue: Q) -> Result<Self, QueueError> {
        queue.lock_process().await?;
        Ok(Self { queue: Some(queue) })
    }

    pub async fn release(mut self) {
        if let Some(queue) = self.queue.as_ref() {
            if let Err(e) = queue.unlock_process().await {
                tracing::error!(error = %e, "failed to release process lock");
            }
        }
        // Only disarm once unlock has finished; a cancelled unlock is retried by Drop
        self.queue = None;
    }
}

impl<Q: JobQueue> Drop for ProcessLockGuard<Q> {
    fn drop(&mut self) {
        let Some(queue) = self.queue.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::warn!("burst interrupted, releasing process lock in background");
                handle.spawn(async move {
                    if let Err(e) = queue.unlock_process().await {
                        tracing::error!(error = %e, "failed to release process lock");
                    }
                });
            }
            Err(_) => {
                tracing::error!("process lock leaked; it will be cleared once stale");
            }
        }
    }
}

/// Run a bounded processing burst against `queue`.
///
/// Every queue call, locked or not, counts against `limits.time_limit`. When
/// the window closes mid-call the burst is abandoned and a held lock is
/// released through [`ProcessLockGuard`]'s drop.
pub async fn process_one_cycle<Q: JobQueue>(
    queue: &Q,
    limits: &KickLimits,
) -> Result<KickOutcome, KickError> {
    let deadline = Instant::now() + limits.time_limit;
    match tokio::time::timeout_at(deadline, burst(queue, limits, deadline)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                budget_secs = limits.time_limit.as_secs(),
                "burst window closed while waiting on the queue, abandoning"
            );
            Err(KickError::WindowClosed { budget: limits.time_limit })
        }
    }
}

async fn burst<Q: JobQueue>(
    queue: &Q,
    limits: &KickLimits,
    deadline: Instant,
) -> Result<KickOutcome, KickError> {
    let mut processed = 0;

    loop {
        if queue.is_process_running().await? {
            return Ok(if processed == 0 {
                tracing::info!("queue process already running, not kicking");
                KickOutcome::AlreadyRunning
            } else {
                tracing::info!(processed, "another process took the queue, yielding");
                KickOutcome::Yielded { processed }
            });
        }
        if processed == 0 && queue.is_queue_empty().await? {
            tracing::info!("queue empty, nothing to kick");
            return Ok(KickOutcome::QueueEmpty);
        }

        let budget = deadline.saturating_duration_since(Instant::now());
        let handed_out = match run_locked_job(queue, budget).await? {
            Some(id) => {
                processed += 1;
                tracing::info!(job_id = %id, processed, "job processed");
                true
            }
            None => {
                tracing::debug!("queue had no job to hand out");
                false
            }
        };

        if queue.is_queue_empty().await? {
            queue.complete().await?;
            tracing::info!(processed, "queue drained, marked complete");
            return Ok(KickOutcome::Completed { processed });
        }
        if !handed_out || processed >= limits.max_jobs || Instant::now() >= deadline {
            queue.dispatch().await?;
            tracing::info!(processed, "burst limit reached, dispatched remaining work");
            return Ok(KickOutcome::Dispatched { processed });
        }
    }
}

/// Take the lock, fetch and process one job, release the lock.
async fn run_locked_job<Q: JobQueue>(queue: &Q, budget: Duration) -> Result<Option<JobId>, KickError> {
    let guard = ProcessLockGuard::acquire(queue.clone()).await?;
    let result = process_next(queue, budget).await;
    guard.release().await;
    result
}

async fn process_next<Q: JobQueue>(queue: &Q, budget: Duration) -> Result<Option<JobId>, KickError> {
    let Some(job) = queue.get_job().await? else {
        return Ok(None);
    };
    tracing::info!(job_id = %job.id, status = %job.status, state = %job.state, "processing job");

    let work = AssertUnwindSafe(queue.process_job(&job)).catch_unwind();
    match tokio::time::timeout(budget, work).await {
        Ok(Ok(Ok(()))) => Ok(Some(job.id)),
        Ok(Ok(Err(e))) => Err(e.into()),
        Ok(Err(panic)) => Err(KickError::Panicked { id: job.id, message: panic_message(&*panic) }),
        Err(_) => Err(KickError::TimedOut { id: job.id, budget }),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
#[path = "kick_tests.rs"]
mod tests;
