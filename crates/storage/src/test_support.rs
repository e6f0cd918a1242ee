// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job cache fixtures for tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`. The query
//! layer never writes the cache; only fixtures do.

#![allow(clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};

use jr_core::{Config, HashType, JobDescriptor, JobId};
use serde::Serialize;
use serde_json::Value;
use tempfile::TempDir;

use crate::codec::{JsonCodec, RecordCodec};
use crate::layout::{LOAD_FILE, MINIONS_FILE, OUT_FILE, RETURN_FILE};
use crate::store::JobCacheStore;

/// A job cache in a temporary directory.
pub struct CacheFixture {
    dir: TempDir,
    config: Config,
}

impl Default for CacheFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheFixture {
    pub fn new() -> Self {
        Self::with_hash_type(HashType::default())
    }

    pub fn with_hash_type(hash_type: HashType) -> Self {
        let dir = tempfile::tempdir().expect("create cache tempdir");
        let config = Config::default().with_cache_dir(dir.path()).with_hash_type(hash_type);
        Self { dir, config }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> JobCacheStore {
        JobCacheStore::new(&self.config)
    }

    /// Layout directory for `jid`.
    pub fn job_dir(&self, jid: &str) -> PathBuf {
        self.store().job_dir(&JobId::new(jid)).path().to_path_buf()
    }

    /// Write a descriptor at the layout directory of its own jid.
    pub fn add_job(&self, load: &JobDescriptor) -> PathBuf {
        let dir = self.job_dir(&load.jid);
        self.write_blob(&dir.join(LOAD_FILE), load);
        dir
    }

    /// Write a descriptor at an arbitrary `<shard>/<name>` directory.
    pub fn add_job_at(&self, shard: &str, name: &str, load: &JobDescriptor) -> PathBuf {
        let dir = self.config.jobs_dir().join(shard).join(name);
        self.write_blob(&dir.join(LOAD_FILE), load);
        dir
    }

    pub fn add_manifest(&self, jid: &str, agents: &[&str]) {
        self.write_blob(&self.job_dir(jid).join(MINIONS_FILE), &agents);
    }

    /// Create an agent's result directory without a result in it.
    pub fn add_agent_dir(&self, jid: &str, agent: &str) -> PathBuf {
        let dir = self.job_dir(jid).join(agent);
        fs::create_dir_all(&dir).expect("create agent dir");
        dir
    }

    pub fn add_return(&self, jid: &str, agent: &str, ret: Value, out: Option<&str>) {
        let dir = self.add_agent_dir(jid, agent);
        self.write_blob(&dir.join(RETURN_FILE), &ret);
        if let Some(out) = out {
            self.write_blob(&dir.join(OUT_FILE), &out);
        }
    }

    /// Write raw bytes at a path relative to the jobs dir.
    pub fn add_raw(&self, rel: impl AsRef<Path>, bytes: &[u8]) -> PathBuf {
        let path = self.config.jobs_dir().join(rel);
        write_file(&path, bytes);
        path
    }

    fn write_blob<T: Serialize + ?Sized>(&self, path: &Path, value: &T) {
        let bytes = JsonCodec.encode(&value).expect("encode fixture blob");
        write_file(path, &bytes);
    }
}

fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture dir");
    }
    fs::write(path, bytes).expect("write fixture file");
}
