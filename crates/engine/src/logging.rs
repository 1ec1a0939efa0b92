// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subscriber installation for hosts that want file logging.
//!
//! Library code only emits `tracing` events; nothing here runs unless the
//! host calls [`init_logging`].

use std::path::Path;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log file name under the log directory.
pub const LOG_FILE: &str = "kicker.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot create log directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("a global subscriber is already installed")]
    AlreadyInstalled,
}

/// Keeps the non-blocking writer alive. Dropping it flushes the log file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Filter from `RUST_LOG`, defaulting to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a global subscriber appending to `<log_dir>/kicker.log`.
pub fn init_logging(log_dir: &Path) -> Result<LoggingGuard, LoggingError> {
    std::fs::create_dir_all(log_dir)?;

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, file_guard) = tracing_appender::non_blocking(appender);
    let file_layer = tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)?;

    Ok(LoggingGuard { _file_guard: file_guard })
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
