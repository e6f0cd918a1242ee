// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::Value;
use thiserror::Error;

/// Errors from output sinks
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Adapter for rendering query results
pub trait OutputSink: Send + Sync {
    /// Render `data` with the named output format, or the sink's default
    /// format when `format` is `None`.
    fn display(&self, data: &Value, format: Option<&str>) -> Result<(), OutputError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{OutputError, OutputSink};
    use parking_lot::Mutex;
    use serde_json::Value;
    use std::sync::Arc;

    /// Recorded output emission
    #[derive(Debug, Clone, PartialEq)]
    pub struct OutputCall {
        pub data: Value,
        pub format: Option<String>,
    }

    /// Fake sink recording every emission
    #[derive(Clone, Default)]
    pub struct FakeOutputSink {
        calls: Arc<Mutex<Vec<OutputCall>>>,
    }

    impl FakeOutputSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<OutputCall> {
            self.calls.lock().clone()
        }
    }

    impl OutputSink for FakeOutputSink {
        fn display(&self, data: &Value, format: Option<&str>) -> Result<(), OutputError> {
            self.calls
                .lock()
                .push(OutputCall { data: data.clone(), format: format.map(str::to_string) });
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeOutputSink, OutputCall};
