//! Churn workload: repeated operand dispatch whose results are dropped back
//! into the pools.

use rayon::prelude::*;
use rug::{Complex, Float, Integer, Rational};
use tracing::debug;

use mpcache_gmp::numeric::precision_hint;
use mpcache_gmp::{apply, BinaryOp, NumericError, Operand, PoolContext, Precision, Rank};

/// What to run.
#[derive(Debug, Clone)]
pub struct Workload {
    /// Kinds to exercise, one pass each.
    pub ranks: Vec<Rank>,
    /// Operations per kind.
    pub iterations: u64,
    /// Operand magnitude in bits.
    pub bits: u32,
    /// Float and complex precision (0 = default).
    pub precision: u32,
}

/// Long-lived operands for one kind.
struct Seeds {
    integer: Integer,
    rational: Rational,
    float: Float,
    complex: Complex,
}

impl Seeds {
    fn new(bits: u32, precision: u32) -> Self {
        let prec = precision_hint(precision).real.bits();
        let integer = (Integer::from(1) << bits) - 1u32;
        let rational = Rational::from((integer.clone(), Integer::from(3)));
        let float = Float::with_val(prec, &rational);
        let complex = Complex::with_val(prec, (&float, 1));
        Self {
            integer,
            rational,
            float,
            complex,
        }
    }

    fn operand(&self, rank: Rank) -> Operand<'_> {
        match rank {
            Rank::Integer => Operand::Integer(&self.integer),
            Rank::Rational => Operand::Rational(&self.rational),
            Rank::Float => Operand::Float(&self.float),
            Rank::Complex => Operand::Complex(&self.complex),
        }
    }
}

/// Run the workload once on the calling thread. Returns the number of
/// operations performed.
pub fn run(ctx: &PoolContext, workload: &Workload) -> Result<u64, NumericError> {
    Precision::from_bits(workload.precision).validate()?;
    let seeds = Seeds::new(workload.bits, workload.precision);
    let mut operations = 0;

    for &rank in &workload.ranks {
        let seed = seeds.operand(rank);
        for i in 0..workload.iterations {
            let step = i64::try_from(i % 1024).unwrap_or(0) + 1;
            let shifted = apply(ctx, BinaryOp::Add, seed, step.into())?;
            // Squaring doubles the footprint, so large seeds exercise eviction.
            let squared = apply(ctx, BinaryOp::Mul, shifted.as_operand(), shifted.as_operand())?;
            let reduced = apply(ctx, BinaryOp::Div, squared.as_operand(), step.into())?;
            drop(reduced);
            operations += 3;
        }
        debug!(%rank, iterations = workload.iterations, "workload pass finished");
    }
    Ok(operations)
}

/// Run the workload on `threads` rayon workers sharing one context.
pub fn run_parallel(
    ctx: &PoolContext,
    workload: &Workload,
    threads: usize,
) -> anyhow::Result<u64> {
    if threads <= 1 {
        return Ok(run(ctx, workload)?);
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;
    let total = pool.install(|| {
        (0..threads)
            .into_par_iter()
            .map(|_| run(ctx, workload))
            .try_reduce(|| 0, |a, b| Ok(a + b))
    })?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use mpcache_pool::PoolConfig;

    use super::*;

    fn workload(ranks: Vec<Rank>, bits: u32) -> Workload {
        Workload {
            ranks,
            iterations: 50,
            bits,
            precision: 0,
        }
    }

    #[test]
    fn counts_operations() {
        let ctx = PoolContext::new(PoolConfig::new(8, 128).unwrap()).unwrap();
        let ops = run(&ctx, &workload(vec![Rank::Integer, Rank::Float], 64)).unwrap();
        assert_eq!(ops, 2 * 50 * 3);
        assert!(ctx.stats().integer.hits > 0);
        assert!(ctx.stats().float.hits > 0);
        assert_eq!(ctx.stats().complex.acquires(), 0);
    }

    #[test]
    fn large_operands_cause_evictions() {
        let ctx = PoolContext::new(PoolConfig::new(8, 4).unwrap()).unwrap();
        run(&ctx, &workload(vec![Rank::Integer], 4096)).unwrap();
        assert!(ctx.stats().integer.evictions > 0);
        assert!(ctx.integers().len() <= 8);
    }

    #[test]
    fn parallel_run_shares_context() {
        let ctx = PoolContext::new(PoolConfig::new(16, 128).unwrap()).unwrap();
        let ops = run_parallel(&ctx, &workload(vec![Rank::Rational], 64), 3).unwrap();
        assert_eq!(ops, 3 * 50 * 3);
        assert!(ctx.rationals().len() <= 16);
    }

    #[test]
    fn every_kind_runs() {
        let ctx = PoolContext::new(PoolConfig::default()).unwrap();
        let ops = run(
            &ctx,
            &workload(
                vec![Rank::Integer, Rank::Rational, Rank::Float, Rank::Complex],
                128,
            ),
        )
        .unwrap();
        assert_eq!(ops, 4 * 50 * 3);
    }
}
