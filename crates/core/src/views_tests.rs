// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn summary_reproduces_descriptor_fields() {
    let load = JobDescriptor::builder().jid("20230101120000000001").user("root").build();
    let summary = JobSummary::new(&load, None).unwrap();

    assert_eq!(
        serde_json::to_value(&summary).unwrap(),
        json!({
            "jid": "20230101120000000001",
            "Start Time": "2023, Jan 01 12:00:00.000001",
            "Function": "test.ping",
            "Arguments": [],
            "Target": "*",
            "Target-type": "glob",
            "User": "root",
        })
    );
}

#[test]
fn summary_includes_minions_when_manifest_present() {
    let load = JobDescriptor::builder().build();
    let minions: BTreeSet<AgentId> = ["web2", "web1"].into_iter().map(AgentId::from).collect();
    let summary = JobSummary::new(&load, Some(minions)).unwrap();
    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["Minions"], json!(["web1", "web2"]));
}

#[test]
fn summary_fails_on_malformed_jid() {
    let load = JobDescriptor::builder().jid("not-a-jid").build();
    assert_eq!(
        JobSummary::new(&load, None),
        Err(JidError::Malformed("not-a-jid".to_string()))
    );
}

#[test]
fn detail_nests_results_per_agent() {
    let load = JobDescriptor::builder().build();
    let mut result = BTreeMap::new();
    result.insert(AgentId::new("agentA"), ReturnRecord::new(json!(true)));
    let detail = JobDetail::new(&load, result).unwrap();
    let value = serde_json::to_value(&detail).unwrap();
    assert_eq!(value["Result"], json!({"agentA": {"return": true}}));
    assert_eq!(value["Function"], json!("test.ping"));
    assert!(value.get("jid").is_none());
}

#[test]
fn snapshot_seed_defaults_user_and_serializes_running_entries() {
    let job = RunningJobInfo::builder().build();
    let mut snap = JobStatusSnapshot::seeded(&job);
    snap.running.push(RunningEntry { agent: AgentId::new("web2"), pid: json!(77) });
    snap.returned.push(AgentId::new("web3"));

    assert_eq!(
        serde_json::to_value(&snap).unwrap(),
        json!({
            "Running": [{"web2": 77}],
            "Returned": ["web3"],
            "Function": "test.sleep",
            "Arguments": [30],
            "Target": "*",
            "Target-type": "glob",
            "User": "root",
        })
    );
}
