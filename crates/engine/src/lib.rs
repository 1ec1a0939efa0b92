// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kicker-engine: the stall watchdog.
//!
//! Watches a job queue across polling cycles, kicks it with a bounded
//! processing burst when it stops making progress, and keeps its recurring
//! registration in step with the operator's settings.

pub mod env;
mod error;
pub mod kick;
pub mod lifecycle;
pub mod logging;
pub mod reconcile;
pub mod service;
pub mod settings;
pub mod watchdog;

pub use error::{KickError, ServiceError, WatchdogError};
pub use kick::{process_one_cycle, KickLimits, KickOutcome, ProcessLockGuard};
pub use lifecycle::{run_from_env, run_until_ctrl_c, EnvHost, Kicker, LifecycleError};
pub use logging::{init_logging, LoggingError, LoggingGuard};
pub use reconcile::{reconcile_registration, ReconcileOutcome};
pub use service::WatchdogService;
pub use settings::{
    effective_limits, kicker_enabled, set_kicker_enabled, update_sync_limits, KICKER_ENABLED_KEY,
    KICKER_UPDATED, LIMITS_UPDATED,
};
pub use watchdog::{CycleOutcome, Watchdog, WatchdogConfig, DEFAULT_MAX_JOBS_PER_KICK};
