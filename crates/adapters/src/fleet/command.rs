// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::future::Future;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use jr_core::{AgentId, ProbeConfig};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::time::{timeout_at, Instant};

use super::{FleetProbe, ProbeError};

/// Probe that shells out to a fleet query command.
///
/// The command runs under `sh -c` with `JR_PROBE_TARGET` and
/// `JR_PROBE_TIMEOUT` (whole seconds) in its environment. Every stdout line
/// is a JSON object of agent replies, e.g. `{"web1": [...]}`; lines are merged
/// as they arrive. When the timeout elapses the command is killed and the
/// replies read so far are returned.
#[derive(Clone, Debug, Default)]
pub struct CommandProbe {
    command: Option<String>,
}

impl CommandProbe {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: Some(command.into()) }
    }

    pub fn from_config(config: &ProbeConfig) -> Self {
        Self { command: config.command.clone() }
    }
}

#[async_trait]
impl FleetProbe for CommandProbe {
    async fn query_running(
        &self,
        target: &str,
        timeout: Duration,
    ) -> Result<IndexMap<AgentId, Value>, ProbeError> {
        let command = self.command.as_deref().ok_or(ProbeError::NotConfigured)?;
        // A timeout past the end of the clock means no deadline.
        let deadline = Instant::now().checked_add(timeout);

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .env("JR_PROBE_TARGET", target)
            .env("JR_PROBE_TIMEOUT", timeout.as_secs().to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let mut replies = IndexMap::new();
        let mut timed_out = false;
        if let Some(stdout) = child.stdout.take() {
            let mut lines = BufReader::new(stdout).lines();
            loop {
                match until(deadline, lines.next_line()).await {
                    Some(Ok(Some(line))) => merge_line(&line, &mut replies),
                    Some(Ok(None)) => break,
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "failed to read probe output");
                        break;
                    }
                    None => {
                        timed_out = true;
                        break;
                    }
                }
            }
        }

        if !timed_out {
            match until(deadline, child.wait()).await {
                Some(Ok(status)) if !status.success() => {
                    tracing::warn!(%status, "probe command exited unsuccessfully");
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => tracing::warn!(error = %e, "failed to wait for probe command"),
                None => timed_out = true,
            }
        }

        if timed_out {
            tracing::debug!(
                replies = replies.len(),
                timeout_secs = timeout.as_secs(),
                "probe timed out; returning partial replies"
            );
            if let Err(e) = child.kill().await {
                tracing::warn!(error = %e, "failed to kill probe command");
            }
        }

        Ok(replies)
    }
}

/// Await `fut` until `deadline`; `None` once it passes.
async fn until<F: Future>(deadline: Option<Instant>, fut: F) -> Option<F::Output> {
    match deadline {
        Some(deadline) => timeout_at(deadline, fut).await.ok(),
        None => Some(fut.await),
    }
}

fn merge_line(line: &str, replies: &mut IndexMap<AgentId, Value>) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    match serde_json::from_str::<IndexMap<AgentId, Value>>(line) {
        Ok(batch) => replies.extend(batch),
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable probe output line"),
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
