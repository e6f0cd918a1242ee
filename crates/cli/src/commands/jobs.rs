// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job query commands

use anyhow::Result;
use clap::Subcommand;
use jr_adapters::{FleetProbe, OutputSink};
use jr_core::JobId;
use jr_engine::Jobs;

#[derive(Debug, Subcommand)]
pub enum JobsCommand {
    /// Show jobs agents report as running, and who has already returned
    Active,
    /// Show each agent's result for a job
    LookupJid {
        /// Job ID
        jid: String,

        /// Read results from this named returner instead of the local cache
        #[arg(long, value_name = "NAME")]
        ext_source: Option<String>,
    },
    /// Show the summary of one cached job
    ListJob {
        /// Job ID
        jid: String,
    },
    /// Show summaries of every cached job
    ListJobs,
    /// Show a cached job together with every agent's result
    PrintJob {
        /// Job ID
        jid: String,
    },
}

pub async fn handle<P, S>(command: JobsCommand, jobs: &Jobs<P, S>) -> Result<()>
where
    P: FleetProbe,
    S: OutputSink,
{
    match command {
        JobsCommand::Active => {
            jobs.active().await?;
        }
        JobsCommand::LookupJid { jid, ext_source } => {
            jobs.lookup_jid(&JobId::new(jid), ext_source.as_deref()).await?;
        }
        JobsCommand::ListJob { jid } => {
            jobs.list_job(&JobId::new(jid))?;
        }
        JobsCommand::ListJobs => {
            jobs.list_jobs()?;
        }
        JobsCommand::PrintJob { jid } => {
            jobs.print_job(&JobId::new(jid))?;
        }
    }
    Ok(())
}
