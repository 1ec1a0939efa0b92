// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kicker-storage: file-backed config store and snapshot slot.

mod config;
mod fs;
mod snapshot;

pub use config::JsonConfigStore;
pub use fs::StorageError;
pub use snapshot::{FileSnapshotStore, SnapshotFile, CURRENT_SNAPSHOT_VERSION};
