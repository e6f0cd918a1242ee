// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn unknown_name_is_an_error() {
    let registry = ReturnerRegistry::new();
    assert!(matches!(registry.get("mysql"), Err(ReturnerError::Unknown(name)) if name == "mysql"));
}

#[test]
fn from_config_registers_declared_returners() {
    let config = Config::from_toml_str(
        r#"
[returners.archive]
kind = "dir"
path = "/srv/returns"

[returners.scratch]
kind = "dir"
path = "/tmp/returns"
"#,
    )
    .unwrap();

    let registry = ReturnerRegistry::from_config(&config);
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["archive", "scratch"]);
    assert!(registry.get("archive").is_ok());
}

#[tokio::test]
async fn registered_returner_is_reachable_by_name() {
    let mut registry = ReturnerRegistry::new();
    registry.register("fake", FakeReturner::new().record("1", "web1", json!({"return": 1})));

    let records = registry.get("fake").unwrap().get_jid(&JobId::new("1")).await.unwrap();
    assert_eq!(records["web1"]["return"], json!(1));
}

#[test]
fn debug_lists_names() {
    let mut registry = ReturnerRegistry::new();
    registry.register("fake", FakeReturner::new());
    assert_eq!(format!("{registry:?}"), r#"{"fake"}"#);
}
