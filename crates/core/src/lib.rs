// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kicker-core: data model for the sync kicker.
//!
//! Job records, snapshots, the process lock marker, stall detection, and the
//! sync limits. Everything here is pure; I/O lives behind the adapter traits.

pub mod macros;

pub mod clock;
pub mod id;
pub mod job;
pub mod limits;
pub mod lock;
pub mod snapshot;
pub mod stall;
pub mod trigger;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use id::short;
pub use job::{JobId, JobRecord, JobStatus};
pub use limits::{
    compute_default_time_limit, normalize, parse_limit, LimitKey, LimitsConfig, LimitsSubmission,
    BASE_TIME_LIMIT_SECS, QUEUE_LOCK_MARGIN_SECS, TIME_LIMIT_BUFFER_SECS,
};
pub use lock::{LockAge, ProcessLock, LOCK_STALE_AFTER};
pub use snapshot::Snapshot;
pub use stall::{find_stalled, needs_recovery};
pub use trigger::{HookId, RecurringTrigger, KICKER_HOOK, POLL_INTERVAL};
