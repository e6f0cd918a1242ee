// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jr-storage: read-only access to the sharded on-disk job cache

pub mod codec;
pub mod layout;
mod store;
mod walk;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use codec::{JsonCodec, RecordCodec};
pub use layout::{jid_hash, job_dir};
pub use store::{CacheError, JobCacheStore, JobDir};
pub use walk::JobWalk;
