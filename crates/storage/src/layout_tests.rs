// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const JID: &str = "20230101120000000001";

#[yare::parameterized(
    md5    = { HashType::Md5,    32 },
    sha1   = { HashType::Sha1,   40 },
    sha224 = { HashType::Sha224, 56 },
    sha256 = { HashType::Sha256, 64 },
    sha384 = { HashType::Sha384, 96 },
    sha512 = { HashType::Sha512, 128 },
)]
fn hash_width_matches_digest(hash_type: HashType, width: usize) {
    let hash = jid_hash(hash_type, &JobId::new(JID));
    assert_eq!(hash.len(), width);
    assert!(hash.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
}

#[test]
fn md5_of_known_input() {
    // md5("abc")
    assert_eq!(jid_hash(HashType::Md5, &JobId::new("abc")), "900150983cd24fb0d6963f7d28e17f72");
}

#[test]
fn sha256_of_known_input() {
    assert_eq!(
        jid_hash(HashType::Sha256, &JobId::new("abc")),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn job_dir_splits_hash_into_shard_and_rest() {
    let dir = job_dir(Path::new("/cache/jobs"), HashType::Md5, &JobId::new("abc"));
    assert_eq!(dir, PathBuf::from("/cache/jobs/90/0150983cd24fb0d6963f7d28e17f72"));
}

#[test]
fn job_dir_depends_on_hash_type() {
    let jid = JobId::new(JID);
    let md5 = job_dir(Path::new("/c"), HashType::Md5, &jid);
    let sha = job_dir(Path::new("/c"), HashType::Sha256, &jid);
    assert_ne!(md5, sha);
}
