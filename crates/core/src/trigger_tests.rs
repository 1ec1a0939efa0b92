// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn kicker_trigger_polls_every_two_minutes() {
    let trigger = RecurringTrigger::kicker();
    assert_eq!(trigger.hook, KICKER_HOOK);
    assert_eq!(trigger.interval, Duration::from_secs(120));
    assert!(trigger.enabled);
}

#[test]
fn enabled_flag_can_be_cleared() {
    let trigger = RecurringTrigger::new("other", Duration::from_secs(5)).enabled(false);
    assert!(!trigger.enabled);
    assert_eq!(trigger.hook.as_str(), "other");
}

#[test]
fn trigger_serde() {
    let trigger = RecurringTrigger::kicker();
    let json = serde_json::to_string(&trigger).unwrap();
    let parsed: RecurringTrigger = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, trigger);
}
