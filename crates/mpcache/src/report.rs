//! Workload report: text and JSON renderings.

use std::fmt::Write as _;
use std::time::Duration;

use serde::Serialize;

use mpcache_gmp::ContextStats;
use mpcache_pool::{PoolConfig, PoolStats};

/// Everything printed after a run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Pool bounds in effect.
    pub config: PoolConfig,
    /// Worker threads.
    pub threads: usize,
    /// Operations performed across threads.
    pub operations: u64,
    /// Wall-clock time of the workload, in seconds.
    pub elapsed_secs: f64,
    /// Handles left in the pools after the run.
    pub pooled: usize,
    /// Per-kind counters.
    pub stats: ContextStats,
}

impl Report {
    /// Assemble a report.
    #[must_use]
    pub fn new(
        config: PoolConfig,
        threads: usize,
        operations: u64,
        elapsed: Duration,
        pooled: usize,
        stats: ContextStats,
    ) -> Self {
        Self {
            config,
            threads,
            operations,
            elapsed_secs: elapsed.as_secs_f64(),
            pooled,
            stats,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable table.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Pool config: max_count={} max_capacity={}",
            self.config.max_count(),
            self.config.max_capacity()
        );
        let _ = writeln!(
            out,
            "Operations: {} on {} thread(s) in {}",
            self.operations,
            self.threads,
            format_duration(Duration::from_secs_f64(self.elapsed_secs))
        );
        let _ = writeln!(out, "Pooled handles: {}", self.pooled);
        let _ = writeln!(
            out,
            "{:<10}{:>10}{:>10}{:>11}{:>10}{:>8}",
            "kind", "hits", "misses", "evictions", "discards", "hit%"
        );
        let rows = [
            ("integer", self.stats.integer),
            ("rational", self.stats.rational),
            ("float", self.stats.float),
            ("complex", self.stats.complex),
            ("total", self.stats.total()),
        ];
        for (name, stats) in rows {
            out.push_str(&format_row(name, &stats));
        }
        out
    }
}

fn format_row(name: &str, stats: &PoolStats) -> String {
    format!(
        "{:<10}{:>10}{:>10}{:>11}{:>10}{:>7.1}%\n",
        name,
        stats.hits,
        stats.misses,
        stats.evictions,
        stats.discards,
        stats.hit_ratio() * 100.0
    )
}

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}
