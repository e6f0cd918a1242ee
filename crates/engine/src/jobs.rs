// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job query entry points.
//!
//! [`Jobs`] owns the configuration and adapters one invocation needs and
//! hands borrowed views of them to the individual query types.

use std::collections::BTreeMap;

use jr_adapters::{FleetProbe, OutputSink, ReturnerRegistry};
use jr_core::{Config, JobDetail, JobId, JobSummary};
use jr_storage::{JobCacheStore, JsonCodec, RecordCodec};

use crate::correlator::{ActiveJobCorrelator, ActiveJobs};
use crate::emit::emit;
use crate::enumerator::JobCacheEnumerator;
use crate::resolver::{JobResolver, JobReturns};
use crate::QueryError;

pub struct Jobs<P, S, C: RecordCodec = JsonCodec> {
    config: Config,
    store: JobCacheStore<C>,
    probe: P,
    returners: ReturnerRegistry,
    sink: S,
}

impl<P: FleetProbe, S: OutputSink> Jobs<P, S, JsonCodec> {
    pub fn new(config: Config, probe: P, returners: ReturnerRegistry, sink: S) -> Self {
        let store = JobCacheStore::new(&config);
        Self { config, store, probe, returners, sink }
    }
}

impl<P: FleetProbe, S: OutputSink, C: RecordCodec> Jobs<P, S, C> {
    /// Build over a store using a non-default record codec.
    pub fn with_store(
        config: Config,
        store: JobCacheStore<C>,
        probe: P,
        returners: ReturnerRegistry,
        sink: S,
    ) -> Self {
        Self { config, store, probe, returners, sink }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Jobs some agent reports as running, with who has already returned.
    pub async fn active(&self) -> Result<ActiveJobs, QueryError> {
        let active = ActiveJobCorrelator::new(&self.store, &self.probe)
            .snapshot(self.config.fleet_timeout())
            .await?;
        emit(&self.sink, &active, None)?;
        Ok(active)
    }

    /// Per-agent results of `jid`, from `ext_source`, the configured
    /// returner or the local cache.
    pub async fn lookup_jid(
        &self,
        jid: &JobId,
        ext_source: Option<&str>,
    ) -> Result<JobReturns, QueryError> {
        let default_source = self.config.ext_job_cache.as_deref();
        JobResolver::new(&self.store, &self.returners, default_source, &self.sink)
            .resolve(jid, ext_source)
            .await
    }

    pub fn list_job(&self, jid: &JobId) -> Result<Option<JobSummary>, QueryError> {
        self.enumerator().list_job(jid)
    }

    pub fn list_jobs(&self) -> Result<BTreeMap<JobId, JobSummary>, QueryError> {
        self.enumerator().list_jobs()
    }

    pub fn print_job(&self, jid: &JobId) -> Result<Option<JobDetail>, QueryError> {
        self.enumerator().print_job(jid)
    }

    fn enumerator(&self) -> JobCacheEnumerator<'_, S, C> {
        JobCacheEnumerator::new(&self.store, &self.sink)
    }
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
