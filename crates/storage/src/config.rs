// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config store persisted as one JSON object.

use crate::fs::{quarantine, write_atomic, StorageError};
use kicker_adapters::{ConfigError, ConfigStore};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// String settings kept in memory and written through to a JSON file.
#[derive(Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl JsonConfigStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable file is moved aside
    /// and also starts empty, so every setting reads as its default.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let values = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "config file corrupt, starting empty");
                    quarantine(&path);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values: Arc::new(Mutex::new(values)) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(values)?;
        write_atomic(&self.path, &bytes)
    }
}

impl ConfigStore for JsonConfigStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut values = self.values.lock();
        let previous = values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&values) {
            // Keep memory consistent with disk
            match previous {
                Some(old) => values.insert(key.to_string(), old),
                None => values.remove(key),
            };
            return Err(ConfigError::WriteFailed { key: key.to_string(), message: e.to_string() });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
