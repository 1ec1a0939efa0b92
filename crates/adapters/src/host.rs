// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What the watchdog knows about the host it runs in.

/// Host facts consulted when registering the watchdog and sizing bursts.
pub trait Host: Send + Sync {
    /// Whether the monitored queue's owner is installed and usable.
    fn queue_available(&self) -> bool;

    /// Maximum execution time the host grants one request, if known.
    fn execution_limit_secs(&self) -> Option<u64>;
}

/// Host facts fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticHost {
    pub available: bool,
    pub execution_limit_secs: Option<u64>,
}

impl StaticHost {
    pub fn new(available: bool, execution_limit_secs: Option<u64>) -> Self {
        Self { available, execution_limit_secs }
    }
}

impl Host for StaticHost {
    fn queue_available(&self) -> bool {
        self.available
    }

    fn execution_limit_secs(&self) -> Option<u64> {
        self.execution_limit_secs
    }
}
