// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jr_adapters::FakeFleetProbe;
use jr_core::JobDescriptor;
use jr_storage::test_support::CacheFixture;
use serde_json::json;

const JID: &str = "20230101120000000001";
const TIMEOUT: Duration = Duration::from_secs(3);

fn running(jid: &str, pid: u64) -> Value {
    json!({
        "jid": jid,
        "fun": "test.sleep",
        "arg": [30],
        "tgt": "*",
        "tgt_type": "glob",
        "user": "deploy",
        "pid": pid,
    })
}

async fn snapshot(cache: &CacheFixture, probe: &FakeFleetProbe) -> ActiveJobs {
    let store = cache.store();
    ActiveJobCorrelator::new(&store, probe).snapshot(TIMEOUT).await.unwrap()
}

#[tokio::test]
async fn seed_agent_adds_no_running_entry() {
    let cache = CacheFixture::new();
    cache.add_job(&JobDescriptor::builder().jid(JID).build());
    cache.add_agent_dir(JID, "agentB");
    let probe = FakeFleetProbe::new()
        .reply("agentA", json!([running(JID, 11)]))
        .reply("agentB", json!([running(JID, 22)]));

    let active = snapshot(&cache, &probe).await;

    let snap = &active[JID];
    assert_eq!(snap.running, vec![RunningEntry { agent: AgentId::new("agentB"), pid: json!(22) }]);
    assert_eq!(snap.returned, vec![AgentId::new("agentB")]);
    assert_eq!(snap.function, json!("test.sleep"));
    assert_eq!(snap.user, json!("deploy"));
}

#[tokio::test]
async fn probes_every_agent_with_configured_timeout() {
    let cache = CacheFixture::new();
    let probe = FakeFleetProbe::new();
    snapshot(&cache, &probe).await;

    let calls = probe.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].target, "*");
    assert_eq!(calls[0].timeout, TIMEOUT);
}

#[tokio::test]
async fn cached_job_without_live_reporter_is_absent() {
    let cache = CacheFixture::new();
    cache.add_job(&JobDescriptor::builder().jid(JID).build());
    cache.add_return(JID, "agentA", json!(true), None);
    let probe = FakeFleetProbe::new().reply("agentA", json!([]));

    assert!(snapshot(&cache, &probe).await.is_empty());
}

#[tokio::test]
async fn uncached_job_has_no_returned_agents() {
    let cache = CacheFixture::new();
    let probe = FakeFleetProbe::new().reply("agentA", json!([running(JID, 1)]));

    let active = snapshot(&cache, &probe).await;
    assert!(active[JID].returned.is_empty());
    assert!(active[JID].running.is_empty());
}

#[tokio::test]
async fn returned_includes_agents_never_reported_running() {
    let cache = CacheFixture::new();
    cache.add_job(&JobDescriptor::builder().jid(JID).build());
    cache.add_manifest(JID, &["agentA", "agentZ"]);
    cache.add_agent_dir(JID, "agentZ");
    cache.add_agent_dir(JID, "stranger");
    let probe = FakeFleetProbe::new().reply("agentA", json!([running(JID, 1)]));

    let active = snapshot(&cache, &probe).await;
    assert_eq!(active[JID].returned, vec![AgentId::new("agentZ"), AgentId::new("stranger")]);
}

#[tokio::test]
async fn non_list_reply_contributes_nothing() {
    let cache = CacheFixture::new();
    let probe = FakeFleetProbe::new()
        .reply("agentA", json!("Minion did not return. [No response]"))
        .reply("agentB", json!([running(JID, 2)]));

    let active = snapshot(&cache, &probe).await;
    assert_eq!(active.len(), 1);
    assert!(active[JID].running.is_empty(), "agentB seeded the job");
}

#[test]
fn aggregate_tracks_jobs_independently() {
    let replies: IndexMap<AgentId, Value> = [
        (AgentId::new("a"), json!([running("20230101120000000001", 1), running("20230101120000000002", 2)])),
        (AgentId::new("b"), json!([running("20230101120000000002", 3)])),
        (AgentId::new("c"), json!([running("20230101120000000002", 4)])),
    ]
    .into_iter()
    .collect();

    let active = aggregate(replies);
    assert!(active["20230101120000000001"].running.is_empty());
    let agents: Vec<&str> =
        active["20230101120000000002"].running.iter().map(|e| e.agent.as_str()).collect();
    assert_eq!(agents, vec!["b", "c"]);
}

#[test]
fn aggregate_passes_garbled_fields_through() {
    let replies: IndexMap<AgentId, Value> = [(
        AgentId::new("a"),
        json!([{"jid": JID, "fun": ["not", "a", "name"], "arg": "scalar", "pid": null}]),
    )]
    .into_iter()
    .collect();

    let snap = &aggregate(replies)[JID];
    assert_eq!(snap.function, json!(["not", "a", "name"]));
    assert_eq!(snap.arguments, json!("scalar"));
    assert_eq!(snap.target, Value::Null);
    assert_eq!(snap.user, json!("root"));
}

#[test]
fn aggregate_ignores_unreadable_entries() {
    let replies: IndexMap<AgentId, Value> =
        [(AgentId::new("a"), json!([{"pid": 1}, running(JID, 2)]))].into_iter().collect();
    let active = aggregate(replies);
    assert_eq!(active.keys().collect::<Vec<_>>(), vec![&JobId::new(JID)]);
}
