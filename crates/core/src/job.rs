// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job records as observed from outside the queue.
//!
//! The watchdog never interprets a job's payload. The only field it decodes
//! is `status`, once, when the record crosses the queue boundary.

use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Key of a job record in the queue's store.
    pub struct JobId;
}

/// Lifecycle status decoded from a job's serialized state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
    /// Missing, unknown, or undecodable status
    Other,
}

impl JobStatus {
    /// Jobs that are expected to make progress between two polls.
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Queued | JobStatus::Processing)
    }

    fn from_label(label: &str) -> Self {
        match label {
            "queued" => JobStatus::Queued,
            "processing" => JobStatus::Processing,
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            _ => JobStatus::Other,
        }
    }

    /// Decode the status from a serialized job state.
    ///
    /// The state is a JSON object with a top-level `status` string. Anything
    /// else decodes as [`JobStatus::Other`].
    pub fn decode(state: &str) -> Self {
        #[derive(Deserialize)]
        struct StatusField {
            status: Option<String>,
        }

        match serde_json::from_str::<StatusField>(state) {
            Ok(StatusField { status: Some(label) }) => Self::from_label(&label),
            _ => JobStatus::Other,
        }
    }
}

crate::simple_display! {
    JobStatus {
        Queued => "queued",
        Processing => "processing",
        Completed => "completed",
        Failed => "failed",
        Other => "other",
    }
}

/// One job record: an opaque serialized state plus its decoded status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    /// Serialized state exactly as the queue stored it
    pub state: String,
    pub status: JobStatus,
}

impl JobRecord {
    /// Build a record from its raw serialized state, decoding the status.
    pub fn decode(id: impl Into<JobId>, state: impl Into<String>) -> Self {
        let state = state.into();
        let status = JobStatus::decode(&state);
        Self { id: id.into(), state, status }
    }

    /// Build a record for a queue that tracks status outside the payload.
    pub fn with_status(id: impl Into<JobId>, state: impl Into<String>, status: JobStatus) -> Self {
        Self { id: id.into(), state: state.into(), status }
    }

    /// Byte-equality of the serialized state.
    pub fn same_state(&self, other: &JobRecord) -> bool {
        self.state.as_bytes() == other.state.as_bytes()
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
