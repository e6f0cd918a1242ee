// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

crate::define_name! {
    /// Identifier of a remote agent (minion), as it names its own result
    /// directory in the job cache.
    pub struct AgentId;
}

impl AgentId {
    /// Dot-prefixed cache entries hold job-level blobs, never agent results.
    pub fn is_hidden_entry(name: &str) -> bool {
        name.starts_with('.')
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
