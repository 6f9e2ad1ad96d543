//! Application configuration from CLI flags and environment.

use clap::{Parser, ValueEnum};

use mpcache_gmp::Rank;
use mpcache_pool::{PoolConfig, PoolError};

/// Which numeric kinds the workload exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindSelection {
    /// Integers only.
    Integer,
    /// Rationals only.
    Rational,
    /// Floats only.
    Float,
    /// Complex numbers only.
    Complex,
    /// Every kind.
    All,
}

impl KindSelection {
    /// Ranks covered by this selection, narrowest first.
    #[must_use]
    pub fn ranks(self) -> Vec<Rank> {
        match self {
            Self::Integer => vec![Rank::Integer],
            Self::Rational => vec![Rank::Rational],
            Self::Float => vec![Rank::Float],
            Self::Complex => vec![Rank::Complex],
            Self::All => vec![Rank::Integer, Rank::Rational, Rank::Float, Rank::Complex],
        }
    }
}

/// mpcache: churn pooled GMP/MPFR/MPC handles and report how the pools behave.
#[derive(Parser, Debug)]
#[command(name = "mpcache", version, about)]
pub struct AppConfig {
    /// Handles retained per numeric kind (0 to 1000).
    #[arg(long, default_value = "100", env = "MPCACHE_SIZE", allow_negative_numbers = true)]
    pub cache_size: i64,

    /// Largest capacity, in limbs, a recycled handle may keep (0 to 16384).
    #[arg(
        long,
        default_value = "128",
        env = "MPCACHE_OBJECT_SIZE",
        allow_negative_numbers = true
    )]
    pub object_size: i64,

    /// Numeric kinds to exercise.
    #[arg(long, value_enum, default_value = "all")]
    pub kind: KindSelection,

    /// Operations per kind and per thread.
    #[arg(short = 'n', long, default_value = "10000")]
    pub iterations: u64,

    /// Magnitude of the workload operands, in bits.
    #[arg(long, default_value = "256")]
    pub bits: u32,

    /// Float and complex precision in bits (0 = default).
    #[arg(long, default_value = "0")]
    pub precision: u32,

    /// Worker threads sharing the pools.
    #[arg(long, default_value = "1")]
    pub threads: usize,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Quiet mode (print nothing on success).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validated pool bounds from `--cache-size` and `--object-size`.
    pub fn pool_config(&self) -> Result<PoolConfig, PoolError> {
        PoolConfig::try_from((self.cache_size, self.object_size))
    }
}
