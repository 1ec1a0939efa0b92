// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The set of job records observed at one polling instant.

use crate::job::{JobId, JobRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All job records observed at one poll, keyed by job id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    records: BTreeMap<JobId, JobRecord>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from enumerated records. A later record with the same
    /// id replaces an earlier one.
    pub fn from_records(records: impl IntoIterator<Item = JobRecord>) -> Self {
        records.into_iter().collect()
    }

    pub fn insert(&mut self, record: JobRecord) -> Option<JobRecord> {
        self.records.insert(record.id.clone(), record)
    }

    pub fn get(&self, id: &str) -> Option<&JobRecord> {
        self.records.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = &JobId> {
        self.records.keys()
    }

    pub fn records(&self) -> impl Iterator<Item = &JobRecord> {
        self.records.values()
    }
}

impl FromIterator<JobRecord> for Snapshot {
    fn from_iter<I: IntoIterator<Item = JobRecord>>(iter: I) -> Self {
        let mut snapshot = Snapshot::new();
        for record in iter {
            snapshot.insert(record);
        }
        snapshot
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
