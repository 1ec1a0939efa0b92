// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use crate::watchdog::{WatchdogConfig, DEFAULT_MAX_JOBS_PER_KICK};
use kicker_core::LimitsConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("cannot resolve state directory: set KICKER_STATE_DIR or HOME")]
    NoStateDir,
}

/// Resolve state directory: KICKER_STATE_DIR > XDG_STATE_HOME/kicker > ~/.local/state/kicker
pub fn state_dir() -> Result<PathBuf, EnvError> {
    if let Ok(dir) = std::env::var("KICKER_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("kicker"));
    }
    let home = std::env::var("HOME").map_err(|_| EnvError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/kicker"))
}

/// Host execution ceiling in seconds, if the host advertises one.
/// Zero means unlimited and reads as unknown.
pub fn host_execution_limit() -> Option<u64> {
    std::env::var("KICKER_MAX_EXECUTION_TIME")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
}

/// Jobs per burst (default 5, configurable via `KICKER_MAX_JOBS_PER_KICK`).
pub fn max_jobs_per_kick() -> usize {
    std::env::var("KICKER_MAX_JOBS_PER_KICK")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MAX_JOBS_PER_KICK)
}

/// Cycle parameters for `limits`, with the burst job cap from the environment.
pub fn watchdog_config(limits: &LimitsConfig) -> WatchdogConfig {
    WatchdogConfig::from_limits(limits).max_jobs_per_kick(max_jobs_per_kick())
}

/// Files kept under the state directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    pub config: PathBuf,
    pub snapshot: PathBuf,
    pub logs: PathBuf,
}

impl StatePaths {
    pub fn new(root: &Path) -> Self {
        Self {
            config: root.join("config.json"),
            snapshot: root.join("snapshot.json"),
            logs: root.join("logs"),
        }
    }

    /// Paths under the resolved [`state_dir`].
    pub fn resolve() -> Result<Self, EnvError> {
        Ok(Self::new(&state_dir()?))
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
