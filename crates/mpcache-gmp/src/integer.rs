//! Pooled arbitrary-precision integers (`mpz`).

use mpcache_pool::{HandleKind, PoolError};
use rug::Integer;

use crate::limbs_for_bits;

/// Largest number of bits an acquire may ask to reserve.
pub const MAX_RESERVE_BITS: usize = u32::MAX as usize;

/// Integer handles. The hint is a number of bits to reserve; `0` reserves
/// nothing beyond what the handle already holds.
pub struct IntegerKind;

impl HandleKind for IntegerKind {
    type Handle = Integer;
    type Hint = usize;
    const NAME: &'static str = "integer";

    fn init_default() -> Integer {
        Integer::new()
    }

    fn init_with_hint(bits: usize) -> Integer {
        if bits == 0 {
            Integer::new()
        } else {
            Integer::with_capacity(bits)
        }
    }

    fn reinit(handle: &mut Integer, bits: usize) {
        if handle.capacity() < bits {
            handle.reserve(bits);
        }
    }

    fn validate_hint(bits: usize) -> Result<(), PoolError> {
        if bits > MAX_RESERVE_BITS {
            return Err(PoolError::InvalidArgument(format!(
                "cannot reserve {bits} bits (limit {MAX_RESERVE_BITS})"
            )));
        }
        Ok(())
    }

    fn capacity_of(handle: &Integer) -> usize {
        limbs_for_bits(handle.capacity())
    }
}
