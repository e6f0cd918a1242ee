// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live running/returned view of active jobs.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::time::Duration;

use indexmap::IndexMap;
use jr_adapters::{FleetProbe, ALL_AGENTS};
use jr_core::{AgentId, AgentReport, JobId, JobStatusSnapshot, RunningEntry};
use jr_storage::{JobCacheStore, RecordCodec};
use serde_json::Value;

use crate::QueryError;

/// Active jobs keyed by jid.
pub type ActiveJobs = BTreeMap<JobId, JobStatusSnapshot>;

/// Correlates what agents report as running with what the cache holds.
pub struct ActiveJobCorrelator<'a, P, C: RecordCodec> {
    store: &'a JobCacheStore<C>,
    probe: &'a P,
}

impl<'a, P: FleetProbe, C: RecordCodec> ActiveJobCorrelator<'a, P, C> {
    pub fn new(store: &'a JobCacheStore<C>, probe: &'a P) -> Self {
        Self { store, probe }
    }

    /// Probe the whole fleet and build the active-job view.
    ///
    /// Only jobs some agent reports as running appear; a fully cached job
    /// nobody is running is not active.
    pub async fn snapshot(&self, timeout: Duration) -> Result<ActiveJobs, QueryError> {
        let replies = self.probe.query_running(ALL_AGENTS, timeout).await?;
        tracing::debug!(agents = replies.len(), "fleet probe answered");

        let mut active = aggregate(replies);
        for (jid, snapshot) in active.iter_mut() {
            // Every result directory counts, including agents never seen running.
            snapshot.returned = self.store.returned_agents(jid).into_iter().collect();
        }
        Ok(active)
    }
}

/// Fold agent replies into per-job snapshots.
///
/// The first report of a job seeds its snapshot and adds no running entry;
/// every later report of the same job adds `{agent: pid}`. Agents whose reply
/// is not a job list contribute nothing.
pub fn aggregate(replies: IndexMap<AgentId, Value>) -> ActiveJobs {
    let mut active = ActiveJobs::new();
    for (agent, payload) in replies {
        let AgentReport::Running(jobs) = AgentReport::from_payload(&agent, payload) else {
            continue;
        };
        for job in jobs {
            match active.entry(job.jid.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(JobStatusSnapshot::seeded(&job));
                }
                Entry::Occupied(mut entry) => {
                    entry.get_mut().running.push(RunningEntry { agent: agent.clone(), pid: job.pid });
                }
            }
        }
    }
    active
}

#[cfg(test)]
#[path = "correlator_tests.rs"]
mod tests;
