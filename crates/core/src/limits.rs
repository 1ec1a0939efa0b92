// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sync limits and the time-box for a processing burst.
//!
//! The burst window (`default_time_limit`) must fit inside the host's
//! execution ceiling, and the queue lock must outlive the burst it protects,
//! otherwise a second burst can start while the first is still running.

use serde::{Deserialize, Serialize};

/// Burst window used when the host ceiling is unknown or too small.
pub const BASE_TIME_LIMIT_SECS: u64 = 20;

/// Headroom kept between the burst window and the host execution ceiling.
pub const TIME_LIMIT_BUFFER_SECS: u64 = 10;

/// Minimum amount by which the queue lock outlives the burst window.
pub const QUEUE_LOCK_MARGIN_SECS: u64 = 10;

/// Derive the default burst window from the host execution limit.
pub fn compute_default_time_limit(host_execution_limit_secs: Option<u64>) -> u64 {
    match host_execution_limit_secs {
        Some(limit) if limit > TIME_LIMIT_BUFFER_SECS => limit - TIME_LIMIT_BUFFER_SECS,
        _ => BASE_TIME_LIMIT_SECS,
    }
}

/// Clamp a submitted `(default_time_limit, queue_lock_time)` pair.
///
/// The time limit never exceeds `computed_default`; the lock time is raised
/// to `time_limit + QUEUE_LOCK_MARGIN_SECS` when it would not outlive it.
pub fn normalize(
    submitted_default_time_limit: u64,
    submitted_queue_lock_time: u64,
    computed_default: u64,
) -> (u64, u64) {
    let time_limit = if submitted_default_time_limit >= computed_default {
        computed_default
    } else {
        submitted_default_time_limit
    };
    let lock_time = if submitted_queue_lock_time <= time_limit {
        time_limit + QUEUE_LOCK_MARGIN_SECS
    } else {
        submitted_queue_lock_time
    };
    (time_limit, lock_time)
}

/// A named tunable. Its store key is [`LimitKey::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitKey {
    MaxObjectsToRetrieve,
    MaxObjectsPerUpsert,
    MaxObjectsTotal,
    ImportApiLimit,
    DefaultTimeLimit,
    QueueLockTime,
}

impl LimitKey {
    pub const ALL: [LimitKey; 6] = [
        LimitKey::MaxObjectsToRetrieve,
        LimitKey::MaxObjectsPerUpsert,
        LimitKey::MaxObjectsTotal,
        LimitKey::ImportApiLimit,
        LimitKey::DefaultTimeLimit,
        LimitKey::QueueLockTime,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            LimitKey::MaxObjectsToRetrieve => "max_objects_to_retrieve",
            LimitKey::MaxObjectsPerUpsert => "max_objects_per_upsert",
            LimitKey::MaxObjectsTotal => "max_objects_total",
            LimitKey::ImportApiLimit => "import_api_limit",
            LimitKey::DefaultTimeLimit => "default_time_limit",
            LimitKey::QueueLockTime => "queue_lock_time",
        }
    }

    /// Default value, given the host-derived burst window.
    pub fn default_value(&self, computed_time_limit: u64) -> u64 {
        match self {
            LimitKey::MaxObjectsToRetrieve => 300,
            LimitKey::MaxObjectsPerUpsert => 5000,
            LimitKey::MaxObjectsTotal => 600,
            LimitKey::ImportApiLimit => 100,
            LimitKey::DefaultTimeLimit => computed_time_limit,
            LimitKey::QueueLockTime => computed_time_limit + QUEUE_LOCK_MARGIN_SECS,
        }
    }
}

impl std::fmt::Display for LimitKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Parse a submitted limit. Missing, non-numeric, or zero values fall back
/// to `default`.
pub fn parse_limit(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok()).filter(|v| *v > 0).unwrap_or(default)
}

/// Effective values of every tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_objects_to_retrieve: u64,
    pub max_objects_per_upsert: u64,
    pub max_objects_total: u64,
    pub import_api_limit: u64,
    pub default_time_limit: u64,
    pub queue_lock_time: u64,
}

impl LimitsConfig {
    /// All defaults for a host whose burst window is `computed_time_limit`.
    pub fn defaults(computed_time_limit: u64) -> Self {
        let default = |key: LimitKey| key.default_value(computed_time_limit);
        Self {
            max_objects_to_retrieve: default(LimitKey::MaxObjectsToRetrieve),
            max_objects_per_upsert: default(LimitKey::MaxObjectsPerUpsert),
            max_objects_total: default(LimitKey::MaxObjectsTotal),
            import_api_limit: default(LimitKey::ImportApiLimit),
            default_time_limit: default(LimitKey::DefaultTimeLimit),
            queue_lock_time: default(LimitKey::QueueLockTime),
        }
    }

    pub fn get(&self, key: LimitKey) -> u64 {
        match key {
            LimitKey::MaxObjectsToRetrieve => self.max_objects_to_retrieve,
            LimitKey::MaxObjectsPerUpsert => self.max_objects_per_upsert,
            LimitKey::MaxObjectsTotal => self.max_objects_total,
            LimitKey::ImportApiLimit => self.import_api_limit,
            LimitKey::DefaultTimeLimit => self.default_time_limit,
            LimitKey::QueueLockTime => self.queue_lock_time,
        }
    }

    pub fn set(&mut self, key: LimitKey, value: u64) {
        let slot = match key {
            LimitKey::MaxObjectsToRetrieve => &mut self.max_objects_to_retrieve,
            LimitKey::MaxObjectsPerUpsert => &mut self.max_objects_per_upsert,
            LimitKey::MaxObjectsTotal => &mut self.max_objects_total,
            LimitKey::ImportApiLimit => &mut self.import_api_limit,
            LimitKey::DefaultTimeLimit => &mut self.default_time_limit,
            LimitKey::QueueLockTime => &mut self.queue_lock_time,
        };
        *slot = value;
    }
}

/// Raw limit values as submitted by an operator, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsSubmission {
    pub max_objects_to_retrieve: Option<String>,
    pub max_objects_per_upsert: Option<String>,
    pub max_objects_total: Option<String>,
    pub import_api_limit: Option<String>,
    pub default_time_limit: Option<String>,
    pub queue_lock_time: Option<String>,
}

impl LimitsSubmission {
    pub fn raw(&self, key: LimitKey) -> Option<&str> {
        match key {
            LimitKey::MaxObjectsToRetrieve => self.max_objects_to_retrieve.as_deref(),
            LimitKey::MaxObjectsPerUpsert => self.max_objects_per_upsert.as_deref(),
            LimitKey::MaxObjectsTotal => self.max_objects_total.as_deref(),
            LimitKey::ImportApiLimit => self.import_api_limit.as_deref(),
            LimitKey::DefaultTimeLimit => self.default_time_limit.as_deref(),
            LimitKey::QueueLockTime => self.queue_lock_time.as_deref(),
        }
    }

    /// Validate every field and normalize the time pair.
    pub fn resolve(&self, computed_time_limit: u64) -> LimitsConfig {
        let mut limits = LimitsConfig::defaults(computed_time_limit);
        for key in LimitKey::ALL {
            limits.set(key, parse_limit(self.raw(key), key.default_value(computed_time_limit)));
        }
        let (time_limit, lock_time) =
            normalize(limits.default_time_limit, limits.queue_lock_time, computed_time_limit);
        limits.default_time_limit = time_limit;
        limits.queue_lock_time = lock_time;
        limits
    }
}

#[cfg(test)]
#[path = "limits_tests.rs"]
mod tests;
