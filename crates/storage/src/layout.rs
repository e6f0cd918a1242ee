// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk layout of the job cache.
//!
//! ```text
//! <jobs_dir>/<h[..2]>/<h[2..]>/
//!     .load.p           job descriptor
//!     .minions.p        targeted agents (optional)
//!     <agent>/return.p  agent result (optional)
//!     <agent>/out.p     agent output format hint (optional)
//! ```
//!
//! `h` is the lowercase hex digest of the jid under the configured hash.

use std::path::{Path, PathBuf};

use jr_core::{HashType, JobId};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

pub const LOAD_FILE: &str = ".load.p";
pub const MINIONS_FILE: &str = ".minions.p";
pub const RETURN_FILE: &str = "return.p";
pub const OUT_FILE: &str = "out.p";

/// Width of the shard directory name.
pub const SHARD_WIDTH: usize = 2;

/// Lowercase hex digest of a jid.
pub fn jid_hash(hash_type: HashType, jid: &JobId) -> String {
    fn hex<D: Digest>(data: &[u8]) -> String {
        D::digest(data).iter().map(|b| format!("{b:02x}")).collect()
    }
    let data = jid.as_bytes();
    match hash_type {
        HashType::Md5 => hex::<Md5>(data),
        HashType::Sha1 => hex::<Sha1>(data),
        HashType::Sha224 => hex::<Sha224>(data),
        HashType::Sha256 => hex::<Sha256>(data),
        HashType::Sha384 => hex::<Sha384>(data),
        HashType::Sha512 => hex::<Sha512>(data),
    }
}

/// Directory holding everything cached for `jid`.
pub fn job_dir(jobs_dir: &Path, hash_type: HashType, jid: &JobId) -> PathBuf {
    let hash = jid_hash(hash_type, jid);
    let (shard, rest) = hash.split_at(SHARD_WIDTH);
    jobs_dir.join(shard).join(rest)
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
