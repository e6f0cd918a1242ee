// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only accessor over the sharded job cache.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jr_core::{AgentId, Config, HashType, JobDescriptor, JobId, ReturnRecord};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::codec::{JsonCodec, RecordCodec};
use crate::layout::{self, LOAD_FILE, MINIONS_FILE, OUT_FILE, RETURN_FILE};
use crate::walk::JobWalk;

/// Errors reading the job cache.
///
/// Absence is never an error; lookups return `Ok(None)` or empty collections.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed record {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// A job's directory in the cache.
///
/// Obtained either from a jid (via the shard layout) or from a walk, in
/// which case the directory name says nothing about which job it holds.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobDir {
    path: PathBuf,
}

impl JobDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    fn agent_dir(&self, agent: &AgentId) -> PathBuf {
        self.path.join(agent.as_str())
    }
}

/// Job cache reader.
#[derive(Debug, Clone)]
pub struct JobCacheStore<C: RecordCodec = JsonCodec> {
    jobs_dir: PathBuf,
    hash_type: HashType,
    codec: C,
}

impl JobCacheStore<JsonCodec> {
    pub fn new(config: &Config) -> Self {
        Self::with_codec(config, JsonCodec)
    }
}

impl<C: RecordCodec> JobCacheStore<C> {
    pub fn with_codec(config: &Config, codec: C) -> Self {
        Self { jobs_dir: config.jobs_dir(), hash_type: config.hash_type, codec }
    }

    /// Root of the sharded job tree.
    pub fn jobs_dir(&self) -> &Path {
        &self.jobs_dir
    }

    /// Directory for `jid` under the shard layout (whether or not it exists).
    pub fn job_dir(&self, jid: &JobId) -> JobDir {
        JobDir::new(layout::job_dir(&self.jobs_dir, self.hash_type, jid))
    }

    pub fn load_descriptor(&self, jid: &JobId) -> Result<Option<JobDescriptor>, CacheError> {
        self.descriptor_in(&self.job_dir(jid))
    }

    pub fn load_manifest(&self, jid: &JobId) -> Result<Option<BTreeSet<AgentId>>, CacheError> {
        self.manifest_in(&self.job_dir(jid))
    }

    /// Agents whose result directory exists for `jid`.
    pub fn returned_agents(&self, jid: &JobId) -> BTreeSet<AgentId> {
        self.agents_in(&self.job_dir(jid))
    }

    pub fn load_return(
        &self,
        jid: &JobId,
        agent: &AgentId,
    ) -> Result<Option<ReturnRecord>, CacheError> {
        self.return_in(&self.job_dir(jid), agent)
    }

    /// Every recorded agent result for `jid`.
    pub fn load_returns(&self, jid: &JobId) -> BTreeMap<AgentId, ReturnRecord> {
        self.returns_in(&self.job_dir(jid))
    }

    /// Lazily walk every job directory in the cache.
    pub fn walk(&self) -> JobWalk {
        JobWalk::new(&self.jobs_dir)
    }

    /// Jids of every job in the cache with a readable descriptor, in walk order.
    ///
    /// For callers that only need ids. Listings that also read each job's
    /// manifest or results iterate [`Self::walk`] and load per directory.
    pub fn enumerate_jobs(&self) -> impl Iterator<Item = JobId> + '_ {
        self.walk().filter_map(move |dir| match self.descriptor_in(&dir) {
            Ok(load) => load.map(|load| load.jid),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable job descriptor");
                None
            }
        })
    }

    pub fn descriptor_in(&self, dir: &JobDir) -> Result<Option<JobDescriptor>, CacheError> {
        self.read_blob(&dir.path.join(LOAD_FILE))
    }

    pub fn manifest_in(&self, dir: &JobDir) -> Result<Option<BTreeSet<AgentId>>, CacheError> {
        let minions: Option<Vec<AgentId>> = self.read_blob(&dir.path.join(MINIONS_FILE))?;
        Ok(minions.map(|m| m.into_iter().collect()))
    }

    /// Non-hidden subdirectories of a job directory.
    pub fn agents_in(&self, dir: &JobDir) -> BTreeSet<AgentId> {
        let entries = match fs::read_dir(&dir.path) {
            Ok(entries) => entries,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %dir.path.display(), error = %e, "failed to list job directory");
                }
                return BTreeSet::new();
            }
        };

        entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(path = %dir.path.display(), error = %e, "failed to read job directory entry");
                    None
                }
            })
            .filter_map(|entry| {
                let name = match entry.file_name().into_string() {
                    Ok(name) => name,
                    Err(name) => {
                        tracing::warn!(path = %dir.path.display(), name = ?name, "skipping non-UTF-8 agent directory");
                        return None;
                    }
                };
                if AgentId::is_hidden_entry(&name) || !entry.path().is_dir() {
                    return None;
                }
                Some(AgentId::new(name))
            })
            .collect()
    }

    pub fn return_in(
        &self,
        dir: &JobDir,
        agent: &AgentId,
    ) -> Result<Option<ReturnRecord>, CacheError> {
        let agent_dir = dir.agent_dir(agent);
        let Some(ret) = self.read_blob::<serde_json::Value>(&agent_dir.join(RETURN_FILE))? else {
            return Ok(None);
        };
        let out: Option<String> = self.read_blob(&agent_dir.join(OUT_FILE))?;
        Ok(Some(ReturnRecord { ret, out }))
    }

    /// Every agent in `dir` with a readable result.
    ///
    /// Agents without a result file are left out; unreadable results are
    /// logged and left out.
    pub fn returns_in(&self, dir: &JobDir) -> BTreeMap<AgentId, ReturnRecord> {
        let mut returns = BTreeMap::new();
        for agent in self.agents_in(dir) {
            match self.return_in(dir, &agent) {
                Ok(Some(ret)) => {
                    returns.insert(agent, ret);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(%agent, error = %e, "skipping unreadable agent result");
                }
            }
        }
        returns
    }

    fn read_blob<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, CacheError> {
        if !path.is_file() {
            return Ok(None);
        }
        let bytes =
            fs::read(path).map_err(|source| CacheError::Io { path: path.to_path_buf(), source })?;
        self.codec.decode(&bytes).map(Some).map_err(|e| CacheError::Malformed {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
