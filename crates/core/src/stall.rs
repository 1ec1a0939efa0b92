// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stall detection by comparing two consecutive snapshots.
//!
//! Job payloads are opaque, so the only liveness signal is change: a job that
//! is still queued or processing and whose serialized state is byte-identical
//! to the previous poll has made no observable progress for one interval.

use crate::job::JobRecord;
use crate::snapshot::Snapshot;

/// Return the first active job whose state did not change between polls.
pub fn find_stalled<'a>(previous: Option<&Snapshot>, current: &'a Snapshot) -> Option<&'a JobRecord> {
    let previous = previous?;
    previous.records().find_map(|before| {
        let now = current.get(&before.id)?;
        let active = before.status.is_active() && now.status.is_active();
        (active && now.same_state(before)).then_some(now)
    })
}

/// True when at least one active job is unchanged since the previous poll.
///
/// With no previous snapshot there is nothing to compare against.
pub fn needs_recovery(previous: Option<&Snapshot>, current: &Snapshot) -> bool {
    find_stalled(previous, current).is_some()
}

#[cfg(test)]
#[path = "stall_tests.rs"]
mod tests;
