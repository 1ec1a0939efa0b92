// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::BTreeMap;

crate::define_id! {
    /// Test ID type for macro verification.
    pub struct TestId;
}

#[test]
fn define_id_map_lookup_by_str() {
    let mut map = BTreeMap::new();
    map.insert(TestId::new("k"), 42);
    assert_eq!(map.get("k"), Some(&42));
}

#[test]
fn define_id_orders_lexically() {
    let mut ids = vec![TestId::new("b"), TestId::new("c"), TestId::new("a")];
    ids.sort();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn define_id_serializes_transparently() {
    let id = TestId::new("wc_square_background_sync_job_42");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"wc_square_background_sync_job_42\"");
    let parsed: TestId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}

#[yare::parameterized(
    truncates = { "abcdefghijklmnop", 8, "abcdefgh" },
    shorter   = { "abc", 8, "abc" },
    exact     = { "abcdefgh", 8, "abcdefgh" },
    multibyte = { "äöüß", 2, "äö" },
)]
fn short_truncates_on_char_boundary(input: &str, n: usize, expected: &str) {
    assert_eq!(short(input, n), expected);
    assert_eq!(TestId::new(input).short(n), expected);
}
