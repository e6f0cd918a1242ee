// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolve a finished job's per-agent results.

use indexmap::IndexMap;
use jr_adapters::{OutputSink, ReturnerRegistry};
use jr_core::{AgentId, JobId, ReturnRecord};
use jr_storage::{JobCacheStore, RecordCodec};
use serde_json::Value;

use crate::emit::emit;
use crate::QueryError;

/// Output format used for external results that carry no hint.
pub const DEFAULT_RETURN_FORMAT: &str = "nested";

/// Per-agent results of one job.
pub type JobReturns = IndexMap<AgentId, Value>;

/// Resolves job results from an external returner or the local cache.
pub struct JobResolver<'a, S: ?Sized, C: RecordCodec> {
    store: &'a JobCacheStore<C>,
    returners: &'a ReturnerRegistry,
    /// Returner used when the caller names none.
    default_source: Option<&'a str>,
    sink: &'a S,
}

impl<'a, S: OutputSink + ?Sized, C: RecordCodec> JobResolver<'a, S, C> {
    pub fn new(
        store: &'a JobCacheStore<C>,
        returners: &'a ReturnerRegistry,
        default_source: Option<&'a str>,
        sink: &'a S,
    ) -> Self {
        Self { store, returners, default_source, sink }
    }

    /// Resolve `jid`, preferring `ext_source`, then the default returner,
    /// then the local cache.
    ///
    /// Once a returner is chosen the local cache is never consulted, even if
    /// the returner knows nothing about the job. An empty result means no
    /// agent has reported yet (or the job is unknown).
    pub async fn resolve(
        &self,
        jid: &JobId,
        ext_source: Option<&str>,
    ) -> Result<JobReturns, QueryError> {
        let source = ext_source.filter(|s| !s.is_empty()).or(self.default_source);
        match source {
            Some(name) => self.resolve_external(jid, name).await,
            None => self.resolve_local(jid),
        }
    }

    /// One consolidated emission, rendered with the last agent's format hint.
    async fn resolve_external(&self, jid: &JobId, name: &str) -> Result<JobReturns, QueryError> {
        let returner = self.returners.get(name)?;
        let records = returner.get_jid(jid).await?;
        tracing::debug!(%jid, returner = name, agents = records.len(), "resolved from returner");

        let mut returns = JobReturns::new();
        let mut out = DEFAULT_RETURN_FORMAT.to_string();
        for (agent, record) in records {
            let record = ReturnRecord::from_external(&record);
            if let Some(hint) = record.out {
                out = hint;
            }
            returns.insert(agent, record.ret);
        }

        emit(self.sink, &returns, Some(&out))?;
        Ok(returns)
    }

    /// One emission per agent, each with that agent's own format hint.
    fn resolve_local(&self, jid: &JobId) -> Result<JobReturns, QueryError> {
        let mut returns = JobReturns::new();
        for (agent, record) in self.store.load_returns(jid) {
            let single: IndexMap<&AgentId, &Value> = IndexMap::from([(&agent, &record.ret)]);
            emit(self.sink, &single, record.out.as_deref())?;
            returns.insert(agent, record.ret);
        }
        Ok(returns)
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
