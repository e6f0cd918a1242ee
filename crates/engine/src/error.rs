// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use jr_adapters::{OutputError, ProbeError, ReturnerError};
use jr_core::JidError;
use jr_storage::CacheError;
use thiserror::Error;

/// Errors from job queries.
///
/// Missing jobs and results are not errors; queries report them as empty
/// results so callers can tell "nothing yet" from a failure.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("fleet probe failed: {0}")]
    Probe(#[from] ProbeError),
    #[error("external returner failed: {0}")]
    Returner(#[from] ReturnerError),
    #[error("job cache: {0}")]
    Cache(#[from] CacheError),
    #[error(transparent)]
    MalformedJobId(#[from] JidError),
    #[error("output failed: {0}")]
    Output(#[from] OutputError),
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}
