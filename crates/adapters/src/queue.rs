// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job queue the watchdog observes but does not own.

use async_trait::async_trait;
use kicker_core::{JobId, JobRecord, ProcessLock};
use thiserror::Error;

/// Errors from queue operations
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("queue store unavailable: {0}")]
    Unavailable(String),
    #[error("job {id} failed: {message}")]
    JobFailed { id: JobId, message: String },
    #[error("queue store error: {0}")]
    Store(String),
}

/// Operations a persistent, lockable job queue exposes to the watchdog.
///
/// Status decoding happens at this boundary: records come back as
/// [`JobRecord`]s with their status already decoded.
#[async_trait]
pub trait JobQueue: Clone + Send + Sync + 'static {
    /// Every job record currently persisted, in any state.
    async fn job_records(&self) -> Result<Vec<JobRecord>, QueueError>;

    /// The current process lock marker, if any.
    async fn process_lock(&self) -> Result<Option<ProcessLock>, QueueError>;

    /// Forcibly remove the process lock marker.
    async fn clear_process_lock(&self) -> Result<(), QueueError>;

    async fn is_process_running(&self) -> Result<bool, QueueError>;

    async fn is_queue_empty(&self) -> Result<bool, QueueError>;

    async fn lock_process(&self) -> Result<(), QueueError>;

    async fn unlock_process(&self) -> Result<(), QueueError>;

    /// Next job to work on, or `None` when nothing is pending.
    async fn get_job(&self) -> Result<Option<JobRecord>, QueueError>;

    /// Run one job's work. Opaque to the caller.
    async fn process_job(&self, job: &JobRecord) -> Result<(), QueueError>;

    /// Ask the queue's own dispatch mechanism to continue (fire-and-forget).
    async fn dispatch(&self) -> Result<(), QueueError>;

    /// Mark overall processing finished.
    async fn complete(&self) -> Result<(), QueueError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{JobQueue, QueueError};
    use async_trait::async_trait;
    use kicker_core::{Clock, FakeClock, JobId, JobRecord, ProcessLock};
    use parking_lot::Mutex;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Arc;

    /// Recorded queue call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum QueueCall {
        JobRecords,
        ProcessLock,
        ClearProcessLock,
        IsProcessRunning,
        IsQueueEmpty,
        LockProcess,
        UnlockProcess,
        GetJob,
        ProcessJob(JobId),
        Dispatch,
        Complete,
    }

    /// How the fake reacts when a given job is processed.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ProcessBehavior {
        /// Job finishes and leaves the pending queue
        Succeed,
        /// Job returns an error and stays pending
        Fail(String),
        /// Job panics mid-processing
        Panic,
        /// Job never returns
        Hang,
    }

    struct FakeQueueState {
        records: Vec<JobRecord>,
        pending: VecDeque<JobRecord>,
        lock: Option<ProcessLock>,
        behaviors: HashMap<JobId, ProcessBehavior>,
        listing_error: Option<String>,
        get_job_hangs: bool,
        calls: Vec<QueueCall>,
    }

    /// In-memory queue for testing.
    ///
    /// `is_process_running` reports whether a lock marker is present, the
    /// same way the sync queue derives it.
    #[derive(Clone)]
    pub struct FakeJobQueue {
        inner: Arc<Mutex<FakeQueueState>>,
        clock: FakeClock,
    }

    impl Default for FakeJobQueue {
        fn default() -> Self {
            Self::with_clock(FakeClock::new())
        }
    }

    impl FakeJobQueue {
        pub fn new() -> Self {
            Self::default()
        }

        /// Fake whose lock markers are stamped with `clock`.
        pub fn with_clock(clock: FakeClock) -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeQueueState {
                    records: Vec::new(),
                    pending: VecDeque::new(),
                    lock: None,
                    behaviors: HashMap::new(),
                    listing_error: None,
                    get_job_hangs: false,
                    calls: Vec::new(),
                })),
                clock,
            }
        }

        /// Replace the persisted job records.
        pub fn set_records(&self, records: impl IntoIterator<Item = JobRecord>) {
            self.inner.lock().records = records.into_iter().collect();
        }

        /// Append a job to the pending queue.
        pub fn push_pending(&self, job: JobRecord) {
            self.inner.lock().pending.push_back(job);
        }

        pub fn set_lock(&self, lock: Option<ProcessLock>) {
            self.inner.lock().lock = lock;
        }

        pub fn set_behavior(&self, id: impl Into<JobId>, behavior: ProcessBehavior) {
            self.inner.lock().behaviors.insert(id.into(), behavior);
        }

        /// Make `job_records` fail with `message`.
        pub fn fail_listing(&self, message: impl Into<String>) {
            self.inner.lock().listing_error = Some(message.into());
        }

        /// Make `get_job` never return, as a wedged queue store would.
        pub fn hang_get_job(&self) {
            self.inner.lock().get_job_hangs = true;
        }

        pub fn lock(&self) -> Option<ProcessLock> {
            self.inner.lock().lock.clone()
        }

        pub fn pending_len(&self) -> usize {
            self.inner.lock().pending.len()
        }

        /// Get all recorded calls
        pub fn calls(&self) -> Vec<QueueCall> {
            self.inner.lock().calls.clone()
        }

        pub fn count(&self, call: &QueueCall) -> usize {
            self.inner.lock().calls.iter().filter(|c| *c == call).count()
        }

        /// Ids passed to `process_job`, in order.
        pub fn processed(&self) -> Vec<JobId> {
            self.inner
                .lock()
                .calls
                .iter()
                .filter_map(|c| match c {
                    QueueCall::ProcessJob(id) => Some(id.clone()),
                    _ => None,
                })
                .collect()
        }

        fn record(&self, call: QueueCall) {
            self.inner.lock().calls.push(call);
        }
    }

    #[async_trait]
    impl JobQueue for FakeJobQueue {
        async fn job_records(&self) -> Result<Vec<JobRecord>, QueueError> {
            self.record(QueueCall::JobRecords);
            let state = self.inner.lock();
            match &state.listing_error {
                Some(message) => Err(QueueError::Unavailable(message.clone())),
                None => Ok(state.records.clone()),
            }
        }

        async fn process_lock(&self) -> Result<Option<ProcessLock>, QueueError> {
            self.record(QueueCall::ProcessLock);
            Ok(self.inner.lock().lock.clone())
        }

        async fn clear_process_lock(&self) -> Result<(), QueueError> {
            self.record(QueueCall::ClearProcessLock);
            self.inner.lock().lock = None;
            Ok(())
        }

        async fn is_process_running(&self) -> Result<bool, QueueError> {
            self.record(QueueCall::IsProcessRunning);
            Ok(self.inner.lock().lock.is_some())
        }

        async fn is_queue_empty(&self) -> Result<bool, QueueError> {
            self.record(QueueCall::IsQueueEmpty);
            Ok(self.inner.lock().pending.is_empty())
        }

        async fn lock_process(&self) -> Result<(), QueueError> {
            self.record(QueueCall::LockProcess);
            let marker = ProcessLock::new("fake-queue", self.clock.epoch_secs());
            self.inner.lock().lock = Some(marker);
            Ok(())
        }

        async fn unlock_process(&self) -> Result<(), QueueError> {
            self.record(QueueCall::UnlockProcess);
            self.inner.lock().lock = None;
            Ok(())
        }

        async fn get_job(&self) -> Result<Option<JobRecord>, QueueError> {
            self.record(QueueCall::GetJob);
            let hangs = self.inner.lock().get_job_hangs;
            if hangs {
                std::future::pending::<()>().await;
            }
            Ok(self.inner.lock().pending.front().cloned())
        }

        #[allow(clippy::panic)]
        async fn process_job(&self, job: &JobRecord) -> Result<(), QueueError> {
            self.record(QueueCall::ProcessJob(job.id.clone()));
            let behavior = self
                .inner
                .lock()
                .behaviors
                .get(&job.id)
                .cloned()
                .unwrap_or(ProcessBehavior::Succeed);
            match behavior {
                ProcessBehavior::Succeed => {
                    self.inner.lock().pending.retain(|j| j.id != job.id);
                    Ok(())
                }
                ProcessBehavior::Fail(message) => {
                    Err(QueueError::JobFailed { id: job.id.clone(), message })
                }
                ProcessBehavior::Panic => panic!("job {} crashed", job.id),
                ProcessBehavior::Hang => {
                    std::future::pending::<()>().await;
                    Ok(())
                }
            }
        }

        async fn dispatch(&self) -> Result<(), QueueError> {
            self.record(QueueCall::Dispatch);
            Ok(())
        }

        async fn complete(&self) -> Result<(), QueueError> {
            self.record(QueueCall::Complete);
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeJobQueue, ProcessBehavior, QueueCall};

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
