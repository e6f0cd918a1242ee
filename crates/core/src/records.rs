// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Records persisted in the job cache or reported by agents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AgentId, JobId};

/// User recorded on jobs whose descriptor predates the `user` field.
pub const DEFAULT_USER: &str = "root";

/// Preferred key for the payload in an external returner record.
pub const RETURN_KEY: &str = "return";
/// Key used by external records written before `return` was adopted.
pub const LEGACY_RETURN_KEY: &str = "ret";
/// Key carrying the output format hint in an external returner record.
pub const OUT_KEY: &str = "out";

/// Raw per-agent record as an external returner stores it.
pub type ExternalRecord = serde_json::Map<String, Value>;

/// Immutable definition of a dispatched job (the `.load.p` blob).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptor {
    pub jid: JobId,
    pub fun: String,
    pub arg: Vec<Value>,
    pub tgt: Value,
    pub tgt_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl JobDescriptor {
    pub fn user(&self) -> &str {
        self.user.as_deref().unwrap_or(DEFAULT_USER)
    }
}

crate::builder! {
    pub struct JobDescriptorBuilder => JobDescriptor {
        into {
            jid: JobId = "20230101120000000001",
            fun: String = "test.ping",
            tgt_type: String = "glob",
        }
        set {
            arg: Vec<Value> = Vec::new(),
            tgt: Value = Value::from("*"),
        }
        option {
            user: String = None,
        }
    }
}

/// One agent's outcome for a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRecord {
    #[serde(rename = "return")]
    pub ret: Value,
    /// Output format the agent asked its result to be rendered with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out: Option<String>,
}

impl ReturnRecord {
    pub fn new(ret: Value) -> Self {
        Self { ret, out: None }
    }

    pub fn with_out(mut self, out: impl Into<String>) -> Self {
        self.out = Some(out.into());
        self
    }

    /// Read an external returner record.
    ///
    /// `return` wins over the legacy `ret` key when both are present.
    /// Non-string `out` values are ignored.
    pub fn from_external(record: &ExternalRecord) -> Self {
        let ret = record
            .get(RETURN_KEY)
            .or_else(|| record.get(LEGACY_RETURN_KEY))
            .cloned()
            .unwrap_or(Value::Null);
        let out = record.get(OUT_KEY).and_then(Value::as_str).map(str::to_string);
        Self { ret, out }
    }
}

/// A job an agent reports as currently executing.
///
/// Everything but `jid` is carried verbatim from the agent's reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningJobInfo {
    pub jid: JobId,
    #[serde(default)]
    pub fun: Value,
    #[serde(default)]
    pub arg: Value,
    #[serde(default)]
    pub tgt: Value,
    #[serde(default)]
    pub tgt_type: Value,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub pid: Value,
}

crate::builder! {
    pub struct RunningJobInfoBuilder => RunningJobInfo {
        into {
            jid: JobId = "20230101120000000001",
        }
        set {
            fun: Value = Value::from("test.sleep"),
            arg: Value = Value::Array(vec![Value::from(30)]),
            tgt: Value = Value::from("*"),
            tgt_type: Value = Value::from("glob"),
            pid: Value = Value::from(4242),
        }
        option {
            user: Value = None,
        }
    }
}

/// One agent's reply to the running-jobs probe, after validation.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentReport {
    Running(Vec<RunningJobInfo>),
    /// The agent answered with something other than a job list (an error
    /// string, a timeout marker). It says nothing about what is running.
    Skip,
}

impl AgentReport {
    /// Validate a raw probe payload.
    ///
    /// List entries that cannot be read as a running job are dropped; the
    /// rest of the agent's list is kept.
    pub fn from_payload(agent: &AgentId, payload: Value) -> Self {
        let Value::Array(items) = payload else {
            tracing::debug!(%agent, "skipping non-list probe reply");
            return Self::Skip;
        };
        let jobs = items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<RunningJobInfo>(item) {
                Ok(job) => Some(job),
                Err(e) => {
                    tracing::warn!(%agent, error = %e, "dropping unreadable running-job entry");
                    None
                }
            })
            .collect();
        Self::Running(jobs)
    }
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
