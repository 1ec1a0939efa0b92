// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process lock marker written by whoever is processing the queue.
//!
//! The marker is stored as `"<holder> <acquired-at-unix-secs>"`. The holder
//! part is opaque (the queue writes a microtime fragment there) and is only
//! carried through for logging.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Locks older than this are considered leaked and may be cleared.
pub const LOCK_STALE_AFTER: Duration = Duration::from_secs(120);

/// A claim of exclusive access to the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessLock {
    pub holder: String,
    /// `None` when the marker's timestamp could not be read
    pub acquired_at_secs: Option<u64>,
}

/// Freshness of a lock relative to a staleness threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockAge {
    Fresh(Duration),
    Stale(Duration),
    /// Timestamp unreadable; treated like a stale lock
    Unknown,
}

impl LockAge {
    pub fn is_stale(&self) -> bool {
        !matches!(self, LockAge::Fresh(_))
    }
}

impl ProcessLock {
    pub fn new(holder: impl Into<String>, acquired_at_secs: u64) -> Self {
        Self { holder: holder.into(), acquired_at_secs: Some(acquired_at_secs) }
    }

    /// Parse a `"<holder> <unix-secs>"` marker.
    ///
    /// A marker whose second field is missing or non-numeric still parses, with
    /// an unknown acquisition time.
    pub fn parse(marker: &str) -> Self {
        let mut parts = marker.split_whitespace();
        let holder = parts.next().unwrap_or_default().to_string();
        let acquired_at_secs = parts.next().and_then(|ts| ts.parse::<u64>().ok());
        Self { holder, acquired_at_secs }
    }

    /// Seconds elapsed since acquisition. A timestamp in the future is age zero.
    pub fn age(&self, now_secs: u64) -> Option<Duration> {
        self.acquired_at_secs.map(|at| Duration::from_secs(now_secs.saturating_sub(at)))
    }

    /// Classify the lock. Stale means strictly older than `stale_after`.
    pub fn classify(&self, now_secs: u64, stale_after: Duration) -> LockAge {
        match self.age(now_secs) {
            Some(age) if age > stale_after => LockAge::Stale(age),
            Some(age) => LockAge::Fresh(age),
            None => LockAge::Unknown,
        }
    }
}

impl fmt::Display for ProcessLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.acquired_at_secs {
            Some(at) => write!(f, "{} {}", self.holder, at),
            None => f.write_str(&self.holder),
        }
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
