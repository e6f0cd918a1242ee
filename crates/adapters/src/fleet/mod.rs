// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fleet probes: ask every agent what it is running right now.
//!
//! The probe only transports replies. Validating each agent's payload is the
//! caller's job (see [`jr_core::AgentReport`]), so a probe never drops or
//! reshapes what an agent said.

mod command;

pub use command::CommandProbe;

use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use jr_core::AgentId;
use serde_json::Value;
use thiserror::Error;

/// Target expression matching every agent.
pub const ALL_AGENTS: &str = "*";

/// Errors from fleet probes
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no fleet probe command configured")]
    NotConfigured,
    #[error("probe failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Adapter for the running-jobs fleet query
#[async_trait]
pub trait FleetProbe: Clone + Send + Sync + 'static {
    /// Raw replies keyed by agent, in the order they arrived.
    ///
    /// Agents that do not answer within `timeout` are absent from the
    /// result; a partial answer is not an error.
    async fn query_running(
        &self,
        target: &str,
        timeout: Duration,
    ) -> Result<IndexMap<AgentId, Value>, ProbeError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{FleetProbe, ProbeError};
    use async_trait::async_trait;
    use indexmap::IndexMap;
    use jr_core::AgentId;
    use parking_lot::Mutex;
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;

    /// Recorded probe invocation
    #[derive(Debug, Clone, PartialEq)]
    pub struct ProbeCall {
        pub target: String,
        pub timeout: Duration,
    }

    #[derive(Default)]
    struct FakeProbeState {
        replies: IndexMap<AgentId, Value>,
        calls: Vec<ProbeCall>,
    }

    /// Fake fleet probe answering with canned replies
    #[derive(Clone, Default)]
    pub struct FakeFleetProbe {
        inner: Arc<Mutex<FakeProbeState>>,
    }

    impl FakeFleetProbe {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add an agent reply; replies are returned in insertion order.
        pub fn reply(self, agent: &str, payload: Value) -> Self {
            self.inner.lock().replies.insert(AgentId::new(agent), payload);
            self
        }

        pub fn calls(&self) -> Vec<ProbeCall> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl FleetProbe for FakeFleetProbe {
        async fn query_running(
            &self,
            target: &str,
            timeout: Duration,
        ) -> Result<IndexMap<AgentId, Value>, ProbeError> {
            let mut inner = self.inner.lock();
            inner.calls.push(ProbeCall { target: target.to_string(), timeout });
            Ok(inner.replies.clone())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeFleetProbe, ProbeCall};
