// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jr-engine: active-job correlation, result lookup, and cache listings

mod correlator;
mod emit;
mod enumerator;
mod error;
mod jobs;
mod resolver;

pub use correlator::{aggregate, ActiveJobCorrelator, ActiveJobs};
pub use enumerator::JobCacheEnumerator;
pub use error::QueryError;
pub use jobs::Jobs;
pub use resolver::{JobResolver, JobReturns, DEFAULT_RETURN_FORMAT};
