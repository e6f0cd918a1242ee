// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::{Path, PathBuf};

use jr_core::{Config, ConfigError};

/// Default log filter when `JR_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Log filter directive: JR_LOG > "warn"
pub fn log_filter() -> String {
    std::env::var("JR_LOG").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Explicitly requested config file: --config > JR_CONFIG
fn explicit_config_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| std::env::var_os("JR_CONFIG").filter(|s| !s.is_empty()).map(PathBuf::from))
}

/// Per-user config file: <config dir>/jr/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("jr").join("config.toml"))
}

/// Load configuration and apply environment overrides.
///
/// An explicitly named config file must exist. The per-user file is optional.
pub fn load_config(flag: Option<&Path>) -> Result<Config, ConfigError> {
    let config = match explicit_config_path(flag) {
        Some(path) => Config::from_file(&path)?,
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(path) => Config::from_file(&path)?,
            None => Config::default(),
        },
    };
    apply_overrides(config)
}

/// Apply JR_CACHE_DIR, JR_TIMEOUT and JR_EXT_JOB_CACHE.
pub fn apply_overrides(mut config: Config) -> Result<Config, ConfigError> {
    if let Some(dir) = std::env::var_os("JR_CACHE_DIR").filter(|s| !s.is_empty()) {
        config = config.with_cache_dir(dir);
    }
    if let Some(timeout) = std::env::var("JR_TIMEOUT").ok().filter(|s| !s.is_empty()) {
        let secs = timeout
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidValue { key: "JR_TIMEOUT", value: timeout.clone() })?;
        config = config.with_timeout(secs);
    }
    if let Ok(name) = std::env::var("JR_EXT_JOB_CACHE") {
        config = config.with_ext_job_cache(Some(name));
    }
    Ok(config)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
