// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kicker-adapters: the collaborators the watchdog talks to.
//!
//! Traits for the job queue, the snapshot slot, the config store, the
//! scheduler, and the host, plus in-memory implementations. Fakes are
//! exported behind the `test-support` feature.

pub mod config;
pub mod host;
pub mod queue;
pub mod scheduler;
pub mod snapshot;

pub use config::{ConfigError, ConfigStore, MemoryConfigStore, FLAG_OFF, FLAG_ON};
pub use host::{Host, StaticHost};
pub use queue::{JobQueue, QueueError};
pub use scheduler::{IntervalScheduler, Registration, Scheduler, SchedulerError};
pub use snapshot::{MemorySnapshotStore, SnapshotStore, SnapshotStoreError};

#[cfg(any(test, feature = "test-support"))]
pub use queue::{FakeJobQueue, ProcessBehavior, QueueCall};
#[cfg(any(test, feature = "test-support"))]
pub use scheduler::{FakeScheduler, SchedulerCall};
