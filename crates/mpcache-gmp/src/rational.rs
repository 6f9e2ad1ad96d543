//! Pooled rationals (`mpq`).

use mpcache_pool::HandleKind;
use rug::Rational;

use crate::limbs_for_bits;

/// Rational handles. Capacity counts numerator and denominator limbs.
pub struct RationalKind;

impl HandleKind for RationalKind {
    type Handle = Rational;
    type Hint = ();
    const NAME: &'static str = "rational";

    fn init_default() -> Rational {
        Rational::new()
    }

    fn init_with_hint((): ()) -> Rational {
        Rational::new()
    }

    fn reinit(_: &mut Rational, (): ()) {}

    fn capacity_of(handle: &Rational) -> usize {
        limbs_for_bits(handle.numer().capacity()) + limbs_for_bits(handle.denom().capacity())
    }
}

#[cfg(test)]
mod tests {
    use mpcache_pool::{HandlePool, PoolConfig};
    use rug::{Assign, Integer};

    use super::*;

    #[test]
    fn fresh_handle_is_zero_over_one() {
        let value = RationalKind::init_default();
        assert_eq!(value, 0);
        assert_eq!(*value.denom(), 1);
    }

    #[test]
    fn capacity_counts_both_parts() {
        let mut value = Rational::new();
        value.assign((Integer::from(1) << 2048u32, Integer::from(3)));
        let numer_only = limbs_for_bits(value.numer().capacity());
        assert!(RationalKind::capacity_of(&value) > numer_only);
    }

    #[test]
    fn oversized_rational_evicted() {
        let pool = HandlePool::<RationalKind>::new(PoolConfig::new(1, 16).unwrap()).unwrap();
        let mut value = pool.acquire_default();
        value.assign((Integer::from(1), Integer::from(1) << 4096u32));
        pool.release(value);

        let next = pool.acquire_default();
        assert!(RationalKind::capacity_of(&next) <= 16);
        assert_eq!(pool.stats().evictions, 1);
    }
}
