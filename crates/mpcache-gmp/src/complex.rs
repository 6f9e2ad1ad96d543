//! Pooled multiple-precision complex numbers (`mpc`).

use mpcache_pool::{HandleKind, PoolError};
use rug::Complex;
use serde::Serialize;

use crate::float::mantissa_limbs;
use crate::precision::{Precision, DEFAULT_PRECISION};

/// Precision of the real and imaginary parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ComplexPrecision {
    /// Real part.
    pub real: Precision,
    /// Imaginary part.
    pub imag: Precision,
}

impl ComplexPrecision {
    /// Same precision for both parts.
    #[must_use]
    pub const fn uniform(prec: Precision) -> Self {
        Self {
            real: prec,
            imag: prec,
        }
    }

    /// Effective `(real, imag)` bits.
    #[must_use]
    pub const fn bits(self) -> (u32, u32) {
        (self.real.bits(), self.imag.bits())
    }
}

impl From<(u32, u32)> for ComplexPrecision {
    fn from((real, imag): (u32, u32)) -> Self {
        Self {
            real: Precision::from_bits(real),
            imag: Precision::from_bits(imag),
        }
    }
}

/// Complex handles. Parts may carry different precisions; a recycled value
/// is switched to the requested pair.
pub struct ComplexKind;

impl HandleKind for ComplexKind {
    type Handle = Complex;
    type Hint = ComplexPrecision;
    const NAME: &'static str = "complex";

    fn init_default() -> Complex {
        Complex::new(DEFAULT_PRECISION)
    }

    fn init_with_hint(prec: ComplexPrecision) -> Complex {
        Complex::new(prec.bits())
    }

    fn reinit(handle: &mut Complex, prec: ComplexPrecision) {
        let wanted = prec.bits();
        if handle.prec() != wanted {
            handle.set_prec(wanted);
        }
    }

    fn validate_hint(prec: ComplexPrecision) -> Result<(), PoolError> {
        prec.real.validate()?;
        prec.imag.validate()
    }

    fn capacity_of(handle: &Complex) -> usize {
        let (real, imag) = handle.prec();
        mantissa_limbs(real) + mantissa_limbs(imag)
    }
}

#[cfg(test)]
mod tests {
    use mpcache_pool::{HandlePool, PoolConfig};
    use rug::Assign;

    use super::*;

    #[test]
    fn default_precision_pair() {
        let value = ComplexKind::init_default();
        assert_eq!(value.prec(), (DEFAULT_PRECISION, DEFAULT_PRECISION));
    }

    #[test]
    fn zero_bits_mean_default() {
        let prec = ComplexPrecision::from((0, 128));
        assert_eq!(prec.bits(), (DEFAULT_PRECISION, 128));
    }

    #[test]
    fn recycled_complex_takes_distinct_parts() {
        let pool = HandlePool::<ComplexKind>::new(PoolConfig::new(1, 128).unwrap()).unwrap();
        let value = pool.acquire((64, 256).into()).unwrap();
        assert_eq!(value.prec(), (64, 256));
        pool.release(value);

        let value = pool
            .acquire(ComplexPrecision::uniform(Precision::Bits(100)))
            .unwrap();
        assert_eq!(value.prec(), (100, 100));
        assert_eq!(pool.stats().hits, 2);
    }

    #[test]
    fn invalid_imaginary_precision_rejected() {
        let pool = HandlePool::<ComplexKind>::new(PoolConfig::new(1, 128).unwrap()).unwrap();
        let hint = ComplexPrecision {
            real: Precision::Default,
            imag: Precision::Bits(0),
        };
        assert!(pool.acquire(hint).is_err());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn set_and_read_back() {
        let pool = HandlePool::<ComplexKind>::new(PoolConfig::new(1, 128).unwrap()).unwrap();
        let mut value = pool.acquire_default();
        value.assign((1.5, -2.0));
        assert_eq!(*value.real(), 1.5);
        assert_eq!(*value.imag(), -2.0);
    }
}
