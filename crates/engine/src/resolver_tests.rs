// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jr_adapters::{FakeOutputSink, FakeReturner, OutputCall, ReturnerError};
use jr_storage::test_support::CacheFixture;
use serde_json::json;

const JID: &str = "20230101120000000001";

struct Harness {
    cache: CacheFixture,
    store: JobCacheStore,
    returners: ReturnerRegistry,
    sink: FakeOutputSink,
}

impl Harness {
    fn new() -> Self {
        let cache = CacheFixture::new();
        let store = cache.store();
        Self { cache, store, returners: ReturnerRegistry::new(), sink: FakeOutputSink::new() }
    }

    fn with_returner(mut self, name: &str, returner: FakeReturner) -> Self {
        self.returners.register(name, returner);
        self
    }

    async fn resolve(
        &self,
        default_source: Option<&str>,
        ext_source: Option<&str>,
    ) -> Result<JobReturns, QueryError> {
        JobResolver::new(&self.store, &self.returners, default_source, &self.sink)
            .resolve(&JobId::new(JID), ext_source)
            .await
    }
}

#[tokio::test]
async fn external_source_consolidates_with_last_format_hint() {
    let returner = FakeReturner::new()
        .record(JID, "web1", json!({"return": 1, "out": "txt"}))
        .record(JID, "web2", json!({"return": 2, "out": "json"}))
        .record(JID, "web3", json!({"return": 3}));
    let h = Harness::new().with_returner("archive", returner);

    let returns = h.resolve(None, Some("archive")).await.unwrap();

    assert_eq!(serde_json::to_value(&returns).unwrap(), json!({"web1": 1, "web2": 2, "web3": 3}));
    assert_eq!(
        h.sink.calls(),
        vec![OutputCall {
            data: json!({"web1": 1, "web2": 2, "web3": 3}),
            format: Some("json".to_string()),
        }]
    );
}

#[tokio::test]
async fn external_source_defaults_to_nested_format() {
    let returner = FakeReturner::new().record(JID, "web1", json!({"return": true}));
    let h = Harness::new().with_returner("archive", returner);

    h.resolve(Some("archive"), None).await.unwrap();
    assert_eq!(h.sink.calls()[0].format.as_deref(), Some(DEFAULT_RETURN_FORMAT));
}

#[tokio::test]
async fn external_source_prefers_return_over_legacy_key() {
    let returner = FakeReturner::new()
        .record(JID, "web1", json!({"return": "new", "ret": "old"}))
        .record(JID, "web2", json!({"ret": "legacy"}));
    let h = Harness::new().with_returner("archive", returner);

    let returns = h.resolve(Some("archive"), None).await.unwrap();
    assert_eq!(returns["web1"], json!("new"));
    assert_eq!(returns["web2"], json!("legacy"));
}

#[tokio::test]
async fn external_source_never_falls_back_to_cache() {
    let h = Harness::new().with_returner("archive", FakeReturner::new());
    h.cache.add_return(JID, "web1", json!("cached"), None);

    let returns = h.resolve(Some("archive"), None).await.unwrap();

    assert!(returns.is_empty());
    assert_eq!(h.sink.calls().len(), 1);
    assert_eq!(h.sink.calls()[0].data, json!({}));
}

#[tokio::test]
async fn override_beats_configured_default() {
    let default = FakeReturner::new().record(JID, "web1", json!({"return": "default"}));
    let chosen = FakeReturner::new().record(JID, "web1", json!({"return": "chosen"}));
    let h = Harness::new()
        .with_returner("default", default.clone())
        .with_returner("chosen", chosen.clone());

    let returns = h.resolve(Some("default"), Some("chosen")).await.unwrap();

    assert_eq!(returns["web1"], json!("chosen"));
    assert!(default.calls().is_empty());
    assert_eq!(chosen.calls(), vec![JobId::new(JID)]);
}

#[tokio::test]
async fn unknown_returner_is_an_error() {
    let h = Harness::new();
    let err = h.resolve(None, Some("mysql")).await.unwrap_err();
    assert!(matches!(err, QueryError::Returner(ReturnerError::Unknown(_))), "got {err:?}");
    assert!(h.sink.calls().is_empty());
}

#[tokio::test]
async fn local_cache_emits_once_per_agent_with_own_format() {
    let h = Harness::new();
    h.cache.add_return(JID, "web1", json!({"pong": true}), Some("json"));
    h.cache.add_return(JID, "web2", json!("up 3 days"), Some("txt"));
    h.cache.add_return(JID, "web3", json!(false), None);
    h.cache.add_agent_dir(JID, "web4");

    let returns = h.resolve(None, None).await.unwrap();

    assert_eq!(
        serde_json::to_value(&returns).unwrap(),
        json!({"web1": {"pong": true}, "web2": "up 3 days", "web3": false})
    );
    assert_eq!(
        h.sink.calls(),
        vec![
            OutputCall { data: json!({"web1": {"pong": true}}), format: Some("json".into()) },
            OutputCall { data: json!({"web2": "up 3 days"}), format: Some("txt".into()) },
            OutputCall { data: json!({"web3": false}), format: None },
        ]
    );
}

#[tokio::test]
async fn unknown_job_resolves_to_empty_without_output() {
    let h = Harness::new();
    let returns = h.resolve(None, None).await.unwrap();
    assert!(returns.is_empty());
    assert!(h.sink.calls().is_empty());
}

#[tokio::test]
async fn empty_override_uses_local_cache() {
    let h = Harness::new();
    h.cache.add_return(JID, "web1", json!(1), None);
    let returns = h.resolve(None, Some("")).await.unwrap();
    assert_eq!(returns.len(), 1);
}
