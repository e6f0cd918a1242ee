// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! jr: query the job cache and the live status of running jobs

mod color;
mod commands;
mod env;
mod exit_error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use jr_adapters::{CommandProbe, ReturnerRegistry};
use jr_core::{Config, ConfigError};
use jr_engine::Jobs;
use tracing_subscriber::EnvFilter;

use crate::color::Palette;
use crate::commands::jobs::JobsCommand;
use crate::exit_error::ExitError;
use crate::output::{OutputFormat, TerminalSink};

#[derive(Debug, Parser)]
#[command(name = "jr", version, about = "Query cached jobs and live job status", styles = color::styles())]
struct Cli {
    /// Config file (default: $JR_CONFIG, then <config dir>/jr/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Cache directory holding the `jobs` tree
    #[arg(long, global = true, value_name = "PATH")]
    cache_dir: Option<PathBuf>,

    /// Seconds to wait for agents to answer
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Render every result in this format, ignoring per-result hints
    #[arg(long, global = true, value_enum, value_name = "FORMAT")]
    out: Option<OutputFormat>,

    #[command(subcommand)]
    command: JobsCommand,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(ExitError::code_of(&err));
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_new(env::log_filter())
        .unwrap_or_else(|_| EnvFilter::new(env::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli).map_err(ExitError::from)?;
    let default = OutputFormat::from_name(&config.output).ok_or_else(|| {
        ExitError::from(ConfigError::InvalidValue { key: "output", value: config.output.clone() })
    })?;
    tracing::debug!(cache_dir = %config.cache_dir.display(), timeout = config.timeout, "config resolved");

    let probe = CommandProbe::from_config(&config.probe);
    let returners = ReturnerRegistry::from_config(&config);
    let sink = TerminalSink::new(default, cli.out).with_palette(Palette::from_env());
    let jobs = Jobs::new(config, probe, returners, sink);

    commands::jobs::handle(cli.command, &jobs).await
}

/// Config file, then environment, then flags.
fn resolve_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = env::load_config(cli.config.as_deref())?;
    if let Some(dir) = &cli.cache_dir {
        config = config.with_cache_dir(dir);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(secs);
    }
    Ok(config)
}
