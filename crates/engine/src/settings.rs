// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator-facing settings: the kicker toggle and the sync limits.
//!
//! Update paths never fail on bad input. Invalid values fall back to their
//! defaults and the caller gets a status message to show.

use kicker_adapters::{ConfigError, ConfigStore, FLAG_OFF, FLAG_ON};
use kicker_core::{compute_default_time_limit, normalize, LimitKey, LimitsConfig, LimitsSubmission};

/// Store key of the kicker toggle.
pub const KICKER_ENABLED_KEY: &str = "kicker_enabled";

pub const KICKER_UPDATED: &str = "Kicker settings updated.";
pub const LIMITS_UPDATED: &str = "Sync limits updated.";

/// Whether the operator has turned the kicker on. Defaults to off.
pub fn kicker_enabled(store: &dyn ConfigStore) -> bool {
    store.get_flag(KICKER_ENABLED_KEY)
}

/// Store the toggle. A missing submission means the box was unchecked.
pub fn set_kicker_enabled(
    store: &dyn ConfigStore,
    submitted: Option<&str>,
) -> Result<&'static str, ConfigError> {
    let current = store.get_or(KICKER_ENABLED_KEY, FLAG_OFF);
    let new = if submitted == Some(FLAG_ON) { FLAG_ON } else { FLAG_OFF };
    tracing::info!(
        "Option: {} | Current value: {} | New value: {}",
        KICKER_ENABLED_KEY,
        current,
        new
    );
    store.set(KICKER_ENABLED_KEY, new)?;
    Ok(KICKER_UPDATED)
}

/// Limits the queue should run with: stored overrides over host defaults,
/// with the time pair re-normalized against the current host.
pub fn effective_limits(store: &dyn ConfigStore, host_execution_limit: Option<u64>) -> LimitsConfig {
    let computed = compute_default_time_limit(host_execution_limit);
    let mut limits = LimitsConfig::defaults(computed);
    for key in LimitKey::ALL {
        let value = store.get_u64(key.key(), key.default_value(computed));
        limits.set(key, if value == 0 { key.default_value(computed) } else { value });
    }
    let (time_limit, lock_time) =
        normalize(limits.default_time_limit, limits.queue_lock_time, computed);
    limits.default_time_limit = time_limit;
    limits.queue_lock_time = lock_time;
    limits
}

/// Validate and persist submitted limits.
pub fn update_sync_limits(
    store: &dyn ConfigStore,
    submission: &LimitsSubmission,
    host_execution_limit: Option<u64>,
) -> Result<&'static str, ConfigError> {
    let computed = compute_default_time_limit(host_execution_limit);
    let resolved = submission.resolve(computed);
    for key in LimitKey::ALL {
        let current = store.get_u64(key.key(), key.default_value(computed));
        let new = resolved.get(key);
        tracing::info!("Option: {} | Current value: {} | New value: {}", key, current, new);
        store.set(key.key(), &new.to_string())?;
    }
    Ok(LIMITS_UPDATED)
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
