// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key/value configuration store.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors from config store writes
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config write failed for '{key}': {message}")]
    WriteFailed { key: String, message: String },
}

/// Value stored for an enabled toggle.
pub const FLAG_ON: &str = "on";
/// Value stored for a disabled toggle.
pub const FLAG_OFF: &str = "off";

/// String-valued settings with typed, defaulting readers.
///
/// Reads never fail: a missing or malformed value reads as the default.
pub trait ConfigStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError>;

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Numeric setting; non-numeric values fall back to `default`.
    fn get_u64(&self, key: &str, default: u64) -> u64 {
        match self.get(key) {
            None => default,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(key, value = %raw, default, "non-numeric setting, using default");
                default
            }),
        }
    }

    /// `on`/`off` toggle; anything but `on` is off.
    fn get_flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v == FLAG_ON)
    }
}

/// Config store held in process memory.
#[derive(Clone, Default)]
pub struct MemoryConfigStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let values = values.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { values: Arc::new(Mutex::new(values)) }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
