// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recurring trigger registered with a scheduler.
//!
//! A hook names what a registration fires; the scheduler delivers the hook
//! back on every tick and the receiver decides what to run.

use serde::{Deserialize, Serialize};
use std::time::Duration;

crate::define_id! {
    /// Identity of a scheduled hook.
    ///
    /// Registrations are matched by hook, so two registrations with the same
    /// hook are duplicates of each other.
    pub struct HookId;
}

/// Hook under which the watchdog cycle is registered.
pub const KICKER_HOOK: &str = "sync-kicker";

/// Fixed polling interval of the watchdog.
pub const POLL_INTERVAL: Duration = Duration::from_secs(120);

/// A recurring registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTrigger {
    pub hook: HookId,
    pub interval: Duration,
    pub enabled: bool,
}

impl RecurringTrigger {
    pub fn new(hook: impl Into<HookId>, interval: Duration) -> Self {
        Self { hook: hook.into(), interval, enabled: true }
    }

    /// The watchdog's own trigger: [`KICKER_HOOK`] every [`POLL_INTERVAL`].
    pub fn kicker() -> Self {
        Self::new(KICKER_HOOK, POLL_INTERVAL)
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
