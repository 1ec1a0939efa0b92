// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sync limits specs
//!
//! Host-derived defaults, clamping, and persistence across reopen.

use crate::prelude::*;
use kicker_adapters::ConfigStore;
use kicker_core::{compute_default_time_limit, normalize, LimitsSubmission};
use kicker_engine::{effective_limits, update_sync_limits};
use kicker_storage::JsonConfigStore;

#[test]
fn default_time_limit_follows_host_ceiling() {
    assert_eq!(compute_default_time_limit(Some(30)), 20);
    assert_eq!(compute_default_time_limit(Some(60)), 50);
    assert_eq!(compute_default_time_limit(Some(5)), 20);
    assert_eq!(compute_default_time_limit(None), 20);
}

#[test]
fn normalize_clamps_and_is_idempotent() {
    let once = normalize(90, 30, 50);
    assert_eq!(once, (50, 60));
    assert_eq!(normalize(once.0, once.1, 50), once);
}

#[test]
fn limits_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let store = JsonConfigStore::open(&path).unwrap();
    let submission = LimitsSubmission {
        max_objects_total: Some("1200".into()),
        default_time_limit: Some("100".into()),
        queue_lock_time: Some("10".into()),
        ..Default::default()
    };

    assert_eq!(update_sync_limits(&store, &submission, Some(60)).unwrap(), "Sync limits updated.");

    let reopened = JsonConfigStore::open(&path).unwrap();
    let limits = effective_limits(&reopened, Some(60));
    assert_eq!(limits.max_objects_total, 1200);
    assert_eq!(limits.default_time_limit, 50);
    assert_eq!(limits.queue_lock_time, 60);
    assert_eq!(reopened.get("import_api_limit").as_deref(), Some("100"));
}

#[tokio::test]
async fn watchdog_service_bursts_within_the_configured_window() {
    let s = Scenario::new();
    let config = MemoryConfigStore::with_values([("default_time_limit", "12")]);
    let mut service = kicker_engine::WatchdogService::new(
        s.watchdog.clone(),
        std::sync::Arc::new(FakeScheduler::new()),
        std::sync::Arc::new(config),
        std::sync::Arc::new(StaticHost::new(true, Some(60))),
    );

    service.tick().await;

    assert_eq!(service.watchdog().config().time_limit, Duration::from_secs(12));
}
