//! Application entry point and dispatch.

use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};

use mpcache_gmp::PoolContext;

use crate::config::AppConfig;
use crate::report::Report;
use crate::version::full_version;
use crate::workload::{self, Workload};

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        clap_complete::generate(shell, &mut cmd, "mpcache", &mut std::io::stdout());
        return Ok(());
    }

    debug!(version = %full_version(), "starting");
    let pool_config = config.pool_config()?;
    let ctx = PoolContext::new(pool_config)?;

    let work = Workload {
        ranks: config.kind.ranks(),
        iterations: config.iterations,
        bits: config.bits,
        precision: config.precision,
    };
    let threads = config.threads.max(1);

    let start = Instant::now();
    let operations = workload::run_parallel(&ctx, &work, threads)
        .context("workload failed")?;
    let elapsed = start.elapsed();

    let pooled = ctx.pooled();
    let stats = ctx.shutdown();
    info!(operations, ?elapsed, "workload complete");

    if config.quiet {
        return Ok(());
    }
    let report = Report::new(pool_config, threads, operations, elapsed, pooled, stats);
    let mut stdout = std::io::stdout().lock();
    if config.json {
        writeln!(stdout, "{}", report.to_json()?)?;
    } else {
        write!(stdout, "{}", report.to_text())?;
    }
    Ok(())
}
