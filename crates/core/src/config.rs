// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Query-layer configuration.
//!
//! Built once at startup and passed by reference to every component; nothing
//! reads configuration from process-wide state after that.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Subdirectory of the cache dir holding the sharded job tree.
pub const JOBS_SUBDIR: &str = "jobs";

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Digest used to derive a job's shard directory from its jid.
///
/// Must match whatever wrote the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashType {
    #[default]
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

crate::simple_display! {
    HashType {
        Md5 => "md5",
        Sha1 => "sha1",
        Sha224 => "sha224",
        Sha256 => "sha256",
        Sha384 => "sha384",
        Sha512 => "sha512",
    }
}

/// How to reach the fleet for the running-jobs probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    /// Shell command streaming one JSON object of agent replies per line.
    pub command: Option<String>,
}

/// A named external returner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ReturnerConfig {
    /// One `<jid>.json` file per job under `path`.
    Dir { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root of the controller cache; jobs live under `<cache_dir>/jobs`.
    pub cache_dir: PathBuf,
    /// Seconds to wait for agents to answer the running-jobs probe.
    pub timeout: u64,
    /// Returner consulted instead of the local cache when resolving jobs.
    pub ext_job_cache: Option<String>,
    pub hash_type: HashType,
    /// Default output format name.
    pub output: String,
    pub probe: ProbeConfig,
    pub returners: BTreeMap<String, ReturnerConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("/var/cache/jr"),
            timeout: 5,
            ext_job_cache: None,
            hash_type: HashType::default(),
            output: "nested".to_string(),
            probe: ProbeConfig::default(),
            returners: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    /// Root of the sharded job tree.
    pub fn jobs_dir(&self) -> PathBuf {
        self.cache_dir.join(JOBS_SUBDIR)
    }

    pub fn fleet_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = secs;
        self
    }

    pub fn with_ext_job_cache(mut self, name: Option<String>) -> Self {
        self.ext_job_cache = name.filter(|n| !n.is_empty());
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_hash_type(mut self, hash_type: HashType) -> Self {
        self.hash_type = hash_type;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
