// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jr-adapters: fleet probe, external returner, and output sink adapters

pub mod fleet;
pub mod returner;
pub mod sink;

pub use fleet::{CommandProbe, FleetProbe, ProbeError, ALL_AGENTS};
pub use returner::{DirReturner, ExternalReturner, ReturnerError, ReturnerRegistry};
pub use sink::{OutputError, OutputSink};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use fleet::{FakeFleetProbe, ProbeCall};
#[cfg(any(test, feature = "test-support"))]
pub use returner::FakeReturner;
#[cfg(any(test, feature = "test-support"))]
pub use sink::{FakeOutputSink, OutputCall};
