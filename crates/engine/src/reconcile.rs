// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Keep exactly one recurring registration while the watchdog is wanted,
//! and none otherwise.

use kicker_adapters::{Scheduler, SchedulerError};
use kicker_core::RecurringTrigger;

/// What reconciliation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Already in the desired state
    Unchanged,
    /// Watchdog not wanted; this many registrations were removed
    Removed(usize),
    /// No registration existed; one was added
    Added,
    /// Duplicates were removed and a single registration re-added
    Replaced(usize),
}

kicker_core::simple_display! {
    ReconcileOutcome {
        Unchanged => "unchanged",
        Removed(..) => "removed",
        Added => "added",
        Replaced(..) => "replaced",
    }
}

/// Bring `scheduler`'s registrations for `trigger.hook` to the desired state.
///
/// Wanted means `enabled && host_available`. Idempotent.
pub fn reconcile_registration(
    scheduler: &dyn Scheduler,
    trigger: &RecurringTrigger,
    enabled: bool,
    host_available: bool,
) -> Result<ReconcileOutcome, SchedulerError> {
    let existing = scheduler.registrations(&trigger.hook).len();

    if !enabled || !host_available {
        if existing == 0 {
            return Ok(ReconcileOutcome::Unchanged);
        }
        let removed = scheduler.unschedule_all(&trigger.hook);
        tracing::info!(
            hook = %trigger.hook,
            removed,
            enabled,
            host_available,
            "watchdog not wanted, removed recurring registrations"
        );
        return Ok(ReconcileOutcome::Removed(removed));
    }

    match existing {
        1 => Ok(ReconcileOutcome::Unchanged),
        0 => {
            let registration = scheduler.schedule_recurring(trigger)?;
            tracing::info!(
                hook = %trigger.hook,
                registration = registration.id,
                interval_secs = trigger.interval.as_secs(),
                "scheduled recurring watchdog"
            );
            Ok(ReconcileOutcome::Added)
        }
        _ => {
            let removed = scheduler.unschedule_all(&trigger.hook);
            let registration = scheduler.schedule_recurring(trigger)?;
            tracing::info!(
                hook = %trigger.hook,
                removed,
                registration = registration.id,
                "replaced duplicate recurring registrations"
            );
            Ok(ReconcileOutcome::Replaced(removed))
        }
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
