// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jr-core: job ids, cache records, and report types for the jr job query tool

pub mod macros;

pub mod agent;
pub mod config;
pub mod jid;
pub mod records;
pub mod views;

pub use agent::AgentId;
pub use config::{Config, ConfigError, HashType, ProbeConfig, ReturnerConfig};
pub use jid::{JidError, JobId, JobTime};
#[cfg(any(test, feature = "test-support"))]
pub use records::{JobDescriptorBuilder, RunningJobInfoBuilder};
pub use records::{
    AgentReport, ExternalRecord, JobDescriptor, ReturnRecord, RunningJobInfo, DEFAULT_USER,
};
pub use views::{JobDetail, JobHeader, JobStatusSnapshot, JobSummary, RunningEntry};
