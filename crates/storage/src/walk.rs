// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fs::{self, DirEntry, ReadDir};
use std::io;
use std::path::{Path, PathBuf};

use crate::store::JobDir;

/// Lazy walk over every `<shard>/<job>` directory in the cache.
///
/// Yields directories in filesystem order, which is neither sorted nor
/// chronological. Each walk reads the tree once; start a new walk to see
/// the cache again. Entries that cannot be read are logged and skipped.
pub struct JobWalk {
    shards: Option<ReadDir>,
    jobs: Option<ReadDir>,
}

impl JobWalk {
    pub(crate) fn new(jobs_dir: &Path) -> Self {
        let shards = match fs::read_dir(jobs_dir) {
            Ok(shards) => Some(shards),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %jobs_dir.display(), "job cache does not exist");
                None
            }
            Err(e) => {
                tracing::warn!(path = %jobs_dir.display(), error = %e, "failed to list job cache");
                None
            }
        };
        Self { shards, jobs: None }
    }
}

impl Iterator for JobWalk {
    type Item = JobDir;

    fn next(&mut self) -> Option<JobDir> {
        loop {
            if let Some(jobs) = self.jobs.as_mut() {
                if let Some(path) = jobs.find_map(subdir) {
                    return Some(JobDir::new(path));
                }
                self.jobs = None;
            }

            let shard = self.shards.as_mut()?.find_map(subdir)?;
            match fs::read_dir(&shard) {
                Ok(jobs) => self.jobs = Some(jobs),
                Err(e) => {
                    tracing::warn!(path = %shard.display(), error = %e, "failed to list shard");
                }
            }
        }
    }
}

fn subdir(entry: io::Result<DirEntry>) -> Option<PathBuf> {
    match entry {
        Ok(entry) => {
            let path = entry.path();
            path.is_dir().then_some(path)
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to read cache entry");
            None
        }
    }
}

#[cfg(test)]
#[path = "walk_tests.rs"]
mod tests;
