// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result structures handed to the output sink.
//!
//! Field names follow the job runner's established report keys
//! (`Function`, `Target-type`, `Start Time`, ...), so renamed fields are
//! the wire contract here, not an accident of style.

use std::collections::{BTreeMap, BTreeSet};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::records::DEFAULT_USER;
use crate::{AgentId, JidError, JobDescriptor, JobId, JobTime, ReturnRecord, RunningJobInfo};

/// Live view of one job that at least one agent reports as running.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobStatusSnapshot {
    #[serde(rename = "Running")]
    pub running: Vec<RunningEntry>,
    #[serde(rename = "Returned")]
    pub returned: Vec<AgentId>,
    #[serde(rename = "Function")]
    pub function: Value,
    #[serde(rename = "Arguments")]
    pub arguments: Value,
    #[serde(rename = "Target")]
    pub target: Value,
    #[serde(rename = "Target-type")]
    pub target_type: Value,
    #[serde(rename = "User")]
    pub user: Value,
}

impl JobStatusSnapshot {
    /// Seed a snapshot from the first agent report seen for a job.
    pub fn seeded(job: &RunningJobInfo) -> Self {
        Self {
            running: Vec::new(),
            returned: Vec::new(),
            function: job.fun.clone(),
            arguments: job.arg.clone(),
            target: job.tgt.clone(),
            target_type: job.tgt_type.clone(),
            user: job.user.clone().unwrap_or_else(|| Value::from(DEFAULT_USER)),
        }
    }
}

/// An additional agent running a job, with its process handle.
///
/// Serializes as a single-entry map `{agent: pid}`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningEntry {
    pub agent: AgentId,
    pub pid: Value,
}

impl Serialize for RunningEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.agent, &self.pid)?;
        map.end()
    }
}

/// Descriptor fields shared by summaries and detail reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobHeader {
    #[serde(rename = "Start Time")]
    pub start_time: JobTime,
    #[serde(rename = "Function")]
    pub function: String,
    #[serde(rename = "Arguments")]
    pub arguments: Vec<Value>,
    #[serde(rename = "Target")]
    pub target: Value,
    #[serde(rename = "Target-type")]
    pub target_type: String,
    #[serde(rename = "User")]
    pub user: String,
}

impl JobHeader {
    /// Fails only when the descriptor's jid does not encode a timestamp.
    pub fn from_descriptor(load: &JobDescriptor) -> Result<Self, JidError> {
        Ok(Self {
            start_time: load.jid.start_time()?,
            function: load.fun.clone(),
            arguments: load.arg.clone(),
            target: load.tgt.clone(),
            target_type: load.tgt_type.clone(),
            user: load.user().to_string(),
        })
    }
}

/// Cached definition of a job, optionally with the agents it targeted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSummary {
    pub jid: JobId,
    #[serde(flatten)]
    pub header: JobHeader,
    #[serde(rename = "Minions", skip_serializing_if = "Option::is_none")]
    pub minions: Option<BTreeSet<AgentId>>,
}

impl JobSummary {
    pub fn new(load: &JobDescriptor, minions: Option<BTreeSet<AgentId>>) -> Result<Self, JidError> {
        Ok(Self { jid: load.jid.clone(), header: JobHeader::from_descriptor(load)?, minions })
    }
}

/// Cached definition of a job together with every recorded agent result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetail {
    #[serde(flatten)]
    pub header: JobHeader,
    #[serde(rename = "Result")]
    pub result: BTreeMap<AgentId, ReturnRecord>,
}

impl JobDetail {
    pub fn new(
        load: &JobDescriptor,
        result: BTreeMap<AgentId, ReturnRecord>,
    ) -> Result<Self, JidError> {
        Ok(Self { header: JobHeader::from_descriptor(load)?, result })
    }
}

#[cfg(test)]
#[path = "views_tests.rs"]
mod tests;
