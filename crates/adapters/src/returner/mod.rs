// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External returners: alternative stores for job results.
//!
//! Returners are registered by name once at startup; queries look them up in
//! the [`ReturnerRegistry`] rather than resolving names on every call.

mod dir;

pub use dir::DirReturner;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use jr_core::{AgentId, Config, ExternalRecord, JobId, ReturnerConfig};
use thiserror::Error;

/// Errors from external returners
#[derive(Debug, Error)]
pub enum ReturnerError {
    #[error("unknown returner: {0}")]
    Unknown(String),
    #[error("invalid job id for returner lookup: {0:?}")]
    InvalidJid(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed returner record {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Adapter for an external job-result store
#[async_trait]
pub trait ExternalReturner: Send + Sync + 'static {
    /// Every agent record stored for `jid`, in the store's own order.
    ///
    /// An unknown job yields an empty map.
    async fn get_jid(
        &self,
        jid: &JobId,
    ) -> Result<IndexMap<AgentId, ExternalRecord>, ReturnerError>;
}

/// Named external returners available to queries.
#[derive(Clone, Default)]
pub struct ReturnerRegistry {
    returners: BTreeMap<String, Arc<dyn ExternalReturner>>,
}

impl ReturnerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every returner declared in the configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new();
        for (name, returner) in &config.returners {
            match returner {
                ReturnerConfig::Dir { path } => registry.register(name, DirReturner::new(path)),
            }
        }
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, returner: impl ExternalReturner) {
        self.returners.insert(name.into(), Arc::new(returner));
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn ExternalReturner>, ReturnerError> {
        self.returners.get(name).cloned().ok_or_else(|| ReturnerError::Unknown(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.returners.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for ReturnerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{ExternalReturner, ReturnerError};
    use async_trait::async_trait;
    use indexmap::IndexMap;
    use jr_core::{AgentId, ExternalRecord, JobId};
    use parking_lot::Mutex;
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeReturnerState {
        jobs: HashMap<JobId, IndexMap<AgentId, ExternalRecord>>,
        calls: Vec<JobId>,
    }

    /// Fake returner serving canned records
    #[derive(Clone, Default)]
    pub struct FakeReturner {
        inner: Arc<Mutex<FakeReturnerState>>,
    }

    impl FakeReturner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add an agent record for a job. Non-object values become the
        /// record's `return`.
        pub fn record(self, jid: &str, agent: &str, record: Value) -> Self {
            let record = match record {
                Value::Object(map) => map,
                other => {
                    let mut map = ExternalRecord::new();
                    map.insert("return".to_string(), other);
                    map
                }
            };
            self.inner
                .lock()
                .jobs
                .entry(JobId::new(jid))
                .or_default()
                .insert(AgentId::new(agent), record);
            self
        }

        /// Jids looked up so far
        pub fn calls(&self) -> Vec<JobId> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl ExternalReturner for FakeReturner {
        async fn get_jid(
            &self,
            jid: &JobId,
        ) -> Result<IndexMap<AgentId, ExternalRecord>, ReturnerError> {
            let mut inner = self.inner.lock();
            inner.calls.push(jid.clone());
            Ok(inner.jobs.get(jid).cloned().unwrap_or_default())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeReturner;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
