// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::job::{JobRecord, JobStatus};
use crate::snapshot::Snapshot;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for job records and snapshots.
pub mod strategies {
    use super::record;
    use crate::job::{JobRecord, JobStatus};
    use crate::snapshot::Snapshot;
    use proptest::prelude::*;

    pub fn arb_job_status() -> impl Strategy<Value = JobStatus> {
        prop_oneof![
            Just(JobStatus::Queued),
            Just(JobStatus::Processing),
            Just(JobStatus::Completed),
            Just(JobStatus::Failed),
            Just(JobStatus::Other),
        ]
    }

    pub fn arb_inactive_status() -> impl Strategy<Value = JobStatus> {
        prop_oneof![Just(JobStatus::Completed), Just(JobStatus::Failed), Just(JobStatus::Other)]
    }

    pub fn arb_job_record() -> impl Strategy<Value = JobRecord> {
        ("job_[0-9]{1,2}", arb_job_status(), "[A-Z]{1,3}")
            .prop_map(|(id, status, cursor)| record(&id, status, &cursor))
    }

    pub fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
        proptest::collection::vec(arb_job_record(), 0..8).prop_map(Snapshot::from_records)
    }
}

// ── Record factory functions ────────────────────────────────────────────

/// Serialized job state in the shape the sync queue writes.
pub fn job_state(status: JobStatus, cursor: &str) -> String {
    format!(r#"{{"status":"{status}","cursor":"{cursor}"}}"#)
}

/// A decoded record whose state embeds `status` and `cursor`.
pub fn record(id: &str, status: JobStatus, cursor: &str) -> JobRecord {
    JobRecord::decode(id, job_state(status, cursor))
}

pub fn snapshot_of(records: impl IntoIterator<Item = JobRecord>) -> Snapshot {
    Snapshot::from_records(records)
}
