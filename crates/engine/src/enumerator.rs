// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! List and print jobs from the local cache.

use std::collections::BTreeMap;

use jr_adapters::OutputSink;
use jr_core::{JobDetail, JobId, JobSummary};
use jr_storage::{JobCacheStore, JobDir, RecordCodec};

use crate::emit::{emit, emit_empty};
use crate::QueryError;

pub struct JobCacheEnumerator<'a, S: ?Sized, C: RecordCodec> {
    store: &'a JobCacheStore<C>,
    sink: &'a S,
}

impl<'a, S: OutputSink + ?Sized, C: RecordCodec> JobCacheEnumerator<'a, S, C> {
    pub fn new(store: &'a JobCacheStore<C>, sink: &'a S) -> Self {
        Self { store, sink }
    }

    /// Summary of one job, looked up through the shard layout.
    pub fn list_job(&self, jid: &JobId) -> Result<Option<JobSummary>, QueryError> {
        let summary = self.summarize(&self.store.job_dir(jid))?;
        match &summary {
            Some(summary) => emit(self.sink, summary, None)?,
            None => emit_empty(self.sink)?,
        }
        Ok(summary)
    }

    /// Summaries of every job in the cache.
    ///
    /// Directories without a descriptor, unreadable descriptors and jids
    /// without a timestamp are skipped.
    pub fn list_jobs(&self) -> Result<BTreeMap<JobId, JobSummary>, QueryError> {
        let mut jobs = BTreeMap::new();
        for dir in self.store.walk() {
            match self.summarize(&dir) {
                Ok(Some(summary)) => {
                    jobs.insert(summary.jid.clone(), summary);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(path = %dir.path().display(), error = %e, "skipping job");
                }
            }
        }
        emit(self.sink, &jobs, None)?;
        Ok(jobs)
    }

    /// Full detail of one job, found by descriptor content during a walk.
    ///
    /// Emits once per matching directory. A jid cached in more than one
    /// directory is logged and the last match wins.
    pub fn print_job(&self, jid: &JobId) -> Result<Option<JobDetail>, QueryError> {
        let mut found = None;
        for dir in self.store.walk() {
            let load = match self.store.descriptor_in(&dir) {
                Ok(Some(load)) if load.jid == *jid => load,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(path = %dir.path().display(), error = %e, "skipping job");
                    continue;
                }
            };
            if found.is_some() {
                tracing::warn!(
                    %jid,
                    path = %dir.path().display(),
                    "job id cached in more than one directory; keeping the last"
                );
            }

            let detail = JobDetail::new(&load, self.store.returns_in(&dir))?;
            emit(self.sink, &BTreeMap::from([(jid, &detail)]), None)?;
            found = Some(detail);
        }

        if found.is_none() {
            emit_empty(self.sink)?;
        }
        Ok(found)
    }

    fn summarize(&self, dir: &JobDir) -> Result<Option<JobSummary>, QueryError> {
        let Some(load) = self.store.descriptor_in(dir)? else {
            return Ok(None);
        };
        // An unreadable manifest reads as no manifest.
        let minions = self.store.manifest_in(dir).unwrap_or_else(|e| {
            tracing::warn!(path = %dir.path().display(), error = %e, "ignoring unreadable manifest");
            None
        });
        Ok(Some(JobSummary::new(&load, minions)?))
    }
}

#[cfg(test)]
#[path = "enumerator_tests.rs"]
mod tests;
