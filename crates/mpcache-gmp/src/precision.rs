//! Floating-point precision hints.

use mpcache_pool::PoolError;
use serde::Serialize;

/// Precision (in bits) used when none is requested, matching MPFR's default.
pub const DEFAULT_PRECISION: u32 = 53;

/// Requested precision of a float or of one part of a complex number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Precision {
    /// [`DEFAULT_PRECISION`] bits.
    #[default]
    Default,
    /// An explicit number of bits.
    Bits(u32),
}

impl Precision {
    /// Interpret `0` as the default precision and anything else as explicit.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        if bits == 0 {
            Self::Default
        } else {
            Self::Bits(bits)
        }
    }

    /// Effective number of bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Default => DEFAULT_PRECISION,
            Self::Bits(bits) => bits,
        }
    }

    /// Check the precision against the range MPFR supports.
    pub fn validate(self) -> Result<(), PoolError> {
        let bits = self.bits();
        let (min, max) = (rug::float::prec_min(), rug::float::prec_max());
        if (min..=max).contains(&bits) {
            Ok(())
        } else {
            Err(PoolError::InvalidArgument(format!(
                "invalid precision {bits} (wanted {min} <= precision <= {max})"
            )))
        }
    }
}

impl From<u32> for Precision {
    fn from(bits: u32) -> Self {
        Self::from_bits(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_means_default() {
        assert_eq!(Precision::from_bits(0), Precision::Default);
        assert_eq!(Precision::from(0).bits(), DEFAULT_PRECISION);
        assert_eq!(Precision::from(128), Precision::Bits(128));
    }

    #[test]
    fn validates_against_mpfr_range() {
        assert!(Precision::Default.validate().is_ok());
        assert!(Precision::Bits(rug::float::prec_min()).validate().is_ok());
        assert!(Precision::Bits(rug::float::prec_max()).validate().is_ok());

        let err = Precision::Bits(0).validate().unwrap_err();
        assert!(matches!(err, PoolError::InvalidArgument(_)));
        assert!(err.to_string().contains("invalid precision"));
    }
}
