//! Pooled multiple-precision floats (`mpfr`).

use mpcache_pool::{HandleKind, PoolError};
use rug::Float;

use crate::limbs_for_bits;
use crate::precision::{Precision, DEFAULT_PRECISION};

/// Mantissa limbs of a value with `prec` bits of precision.
pub(crate) fn mantissa_limbs(prec: u32) -> usize {
    limbs_for_bits(usize::try_from(prec).unwrap_or(usize::MAX))
}

/// Float handles. A recycled float is switched to the requested precision.
pub struct FloatKind;

impl HandleKind for FloatKind {
    type Handle = Float;
    type Hint = Precision;
    const NAME: &'static str = "float";

    fn init_default() -> Float {
        Float::new(DEFAULT_PRECISION)
    }

    fn init_with_hint(prec: Precision) -> Float {
        Float::new(prec.bits())
    }

    fn reinit(handle: &mut Float, prec: Precision) {
        if handle.prec() != prec.bits() {
            handle.set_prec(prec.bits());
        }
    }

    fn validate_hint(prec: Precision) -> Result<(), PoolError> {
        prec.validate()
    }

    fn capacity_of(handle: &Float) -> usize {
        mantissa_limbs(handle.prec())
    }
}

#[cfg(test)]
mod tests {
    use mpcache_pool::{HandlePool, PoolConfig};
    use rug::Assign;

    use super::*;

    #[test]
    fn default_precision() {
        let value = FloatKind::init_default();
        assert_eq!(value.prec(), DEFAULT_PRECISION);
        assert_eq!(FloatKind::capacity_of(&value), mantissa_limbs(53));
    }

    #[test]
    fn recycled_float_takes_requested_precision() {
        let pool = HandlePool::<FloatKind>::new(PoolConfig::new(1, 128).unwrap()).unwrap();
        let value = pool.acquire(Precision::Bits(256)).unwrap();
        assert_eq!(value.prec(), 256);
        pool.release(value);

        let value = pool.acquire(Precision::Default).unwrap();
        assert_eq!(value.prec(), DEFAULT_PRECISION);
        assert_eq!(pool.stats().hits, 2);
    }

    #[test]
    fn invalid_precision_rejected() {
        let pool = HandlePool::<FloatKind>::new(PoolConfig::new(2, 128).unwrap()).unwrap();
        assert!(pool.acquire(Precision::Bits(0)).is_err());
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn wide_float_evicted() {
        let pool = HandlePool::<FloatKind>::new(PoolConfig::new(1, 16).unwrap()).unwrap();
        let mut value = pool.acquire(Precision::Bits(4096)).unwrap();
        value.assign(1.5);
        pool.release(value);

        let next = pool.acquire_default();
        assert_eq!(next.prec(), DEFAULT_PRECISION);
        assert_eq!(pool.stats().evictions, 1);
    }

    #[test]
    fn set_and_read_back() {
        let pool = HandlePool::<FloatKind>::new(PoolConfig::new(3, 128).unwrap()).unwrap();
        let mut value = pool.acquire_default();
        value.assign(2.25);
        assert_eq!(value, 2.25);
    }
}
