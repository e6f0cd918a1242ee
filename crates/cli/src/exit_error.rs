// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! `main()` owns process termination; everything below it returns errors.

use std::fmt;

use jr_core::ConfigError;

/// A query or output failure.
pub const EXIT_FAILURE: i32 = 1;
/// Configuration could not be loaded or is invalid (sysexits `EX_CONFIG`).
pub const EXIT_CONFIG: i32 = 78;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Exit code for an arbitrary error chain.
    pub fn code_of(err: &anyhow::Error) -> i32 {
        err.downcast_ref::<ExitError>().map_or(EXIT_FAILURE, |e| e.code)
    }
}

impl From<ConfigError> for ExitError {
    fn from(err: ConfigError) -> Self {
        Self::new(EXIT_CONFIG, err.to_string())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}
