// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use indexmap::IndexMap;
use jr_core::{AgentId, ExternalRecord, JobId};

use super::{ExternalReturner, ReturnerError};

/// Returner backed by a directory of `<jid>.json` files.
///
/// Each file holds an object keyed by agent id whose values are the agent's
/// record (`{"return": ..., "out": ...}`).
#[derive(Clone, Debug)]
pub struct DirReturner {
    root: PathBuf,
}

impl DirReturner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, jid: &JobId) -> Result<PathBuf, ReturnerError> {
        let name = jid.as_str();
        if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
            return Err(ReturnerError::InvalidJid(name.to_string()));
        }
        Ok(self.root.join(format!("{name}.json")))
    }
}

#[async_trait]
impl ExternalReturner for DirReturner {
    async fn get_jid(
        &self,
        jid: &JobId,
    ) -> Result<IndexMap<AgentId, ExternalRecord>, ReturnerError> {
        let path = self.record_path(jid)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(%jid, path = %path.display(), "no returner record");
                return Ok(IndexMap::new());
            }
            Err(source) => return Err(ReturnerError::Io { path, source }),
        };
        serde_json::from_slice(&bytes).map_err(|source| ReturnerError::Malformed { path, source })
    }
}

#[cfg(test)]
#[path = "dir_tests.rs"]
mod tests;
