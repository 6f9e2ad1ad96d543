//! Process-wide owner of the four per-kind pools.

use mpcache_pool::{HandlePool, PoolConfig, PoolError, PoolStats};
use serde::Serialize;
use tracing::{debug, info};

use crate::complex::ComplexKind;
use crate::float::FloatKind;
use crate::integer::IntegerKind;
use crate::rational::RationalKind;

/// Usage counters of every pool in a context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContextStats {
    /// Integer pool.
    pub integer: PoolStats,
    /// Rational pool.
    pub rational: PoolStats,
    /// Float pool.
    pub float: PoolStats,
    /// Complex pool.
    pub complex: PoolStats,
}

impl ContextStats {
    /// Counters summed over all kinds.
    #[must_use]
    pub fn total(&self) -> PoolStats {
        [self.integer, self.rational, self.float, self.complex]
            .into_iter()
            .fold(PoolStats::default(), |acc, s| PoolStats {
                hits: acc.hits + s.hits,
                misses: acc.misses + s.misses,
                evictions: acc.evictions + s.evictions,
                discards: acc.discards + s.discards,
            })
    }
}

/// One pool per numeric kind, constructed and torn down explicitly.
///
/// Numeric code receives a reference to the context (or to one of its
/// pools) rather than reaching for global state.
#[derive(Debug)]
pub struct PoolContext {
    integers: HandlePool<IntegerKind>,
    rationals: HandlePool<RationalKind>,
    floats: HandlePool<FloatKind>,
    complexes: HandlePool<ComplexKind>,
}

impl PoolContext {
    /// Create a context whose pools are pre-warmed to `config.max_count()`.
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let context = Self::empty(config);
        context.apply(config)?;
        Ok(context)
    }

    /// Create a context with empty pools.
    #[must_use]
    pub fn empty(config: PoolConfig) -> Self {
        Self {
            integers: HandlePool::empty(config),
            rationals: HandlePool::empty(config),
            floats: HandlePool::empty(config),
            complexes: HandlePool::empty(config),
        }
    }

    /// Reconfigure all four pools.
    ///
    /// Every pool is staged before any is committed, so on error no pool
    /// changes.
    pub fn configure(&self, max_count: usize, max_capacity: usize) -> Result<(), PoolError> {
        let config = PoolConfig::new(max_count, max_capacity)?;
        self.apply(config)?;
        info!(max_count, max_capacity, "pool context reconfigured");
        Ok(())
    }

    fn apply(&self, config: PoolConfig) -> Result<(), PoolError> {
        let integers = self.integers.stage(config)?;
        let rationals = self.rationals.stage(config)?;
        let floats = self.floats.stage(config)?;
        let complexes = self.complexes.stage(config)?;
        self.integers.commit(integers);
        self.rationals.commit(rationals);
        self.floats.commit(floats);
        self.complexes.commit(complexes);
        Ok(())
    }

    /// Bounds shared by all four pools, or `None` once one of them has been
    /// reconfigured on its own through its accessor.
    #[must_use]
    pub fn current_config(&self) -> Option<PoolConfig> {
        let config = self.integers.current_config();
        let shared = [
            self.rationals.current_config(),
            self.floats.current_config(),
            self.complexes.current_config(),
        ]
        .into_iter()
        .all(|other| other == config);
        shared.then_some(config)
    }

    /// Integer pool.
    #[must_use]
    pub fn integers(&self) -> &HandlePool<IntegerKind> {
        &self.integers
    }

    /// Rational pool.
    #[must_use]
    pub fn rationals(&self) -> &HandlePool<RationalKind> {
        &self.rationals
    }

    /// Float pool.
    #[must_use]
    pub fn floats(&self) -> &HandlePool<FloatKind> {
        &self.floats
    }

    /// Complex pool.
    #[must_use]
    pub fn complexes(&self) -> &HandlePool<ComplexKind> {
        &self.complexes
    }

    /// Total number of pooled handles across kinds.
    #[must_use]
    pub fn pooled(&self) -> usize {
        self.integers.len() + self.rationals.len() + self.floats.len() + self.complexes.len()
    }

    /// Snapshot of every pool's counters.
    #[must_use]
    pub fn stats(&self) -> ContextStats {
        ContextStats {
            integer: self.integers.stats(),
            rational: self.rationals.stats(),
            float: self.floats.stats(),
            complex: self.complexes.stats(),
        }
    }

    /// Zero every pool's counters.
    pub fn reset_stats(&self) {
        self.integers.reset_stats();
        self.rationals.reset_stats();
        self.floats.reset_stats();
        self.complexes.reset_stats();
    }

    /// Free every pooled handle and return the final counters.
    pub fn shutdown(self) -> ContextStats {
        let stats = self.stats();
        debug!(pooled = self.pooled(), "pool context shutting down");
        self.integers.clear();
        self.rationals.clear();
        self.floats.clear();
        self.complexes.clear();
        stats
    }
}

impl Default for PoolContext {
    fn default() -> Self {
        Self::empty(PoolConfig::default())
    }
}
