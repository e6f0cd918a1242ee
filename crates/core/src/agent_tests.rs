// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::BTreeSet;
use yare::parameterized;

#[parameterized(
    load = { ".load.p", true },
    minions = { ".minions.p", true },
    dot = { ".", true },
    agent = { "web1", false },
    dotted_fqdn = { "web1.example.com", false },
)]
fn hidden_entries(name: &str, hidden: bool) {
    assert_eq!(AgentId::is_hidden_entry(name), hidden);
}

#[test]
fn agent_ids_sort_by_name() {
    let agents: BTreeSet<AgentId> = ["web2", "db1", "web1"].into_iter().map(AgentId::new).collect();
    let names: Vec<&str> = agents.iter().map(AgentId::as_str).collect();
    assert_eq!(names, vec!["db1", "web1", "web2"]);
}

#[test]
fn agent_id_serializes_as_plain_string() {
    let id = AgentId::new("web1");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"web1\"");
    assert_eq!(id, "web1");
}
