//! # mpcache-gmp
//!
//! Pooled native numeric handles backed by GMP, MPFR and MPC through `rug`.
//!
//! Each numeric kind ([`IntegerKind`], [`RationalKind`], [`FloatKind`],
//! [`ComplexKind`]) supplies the capability set of
//! [`mpcache_pool::HandleKind`]. A [`PoolContext`] owns one pool per kind and
//! is passed to the code that builds numeric results, such as the operand
//! dispatch in [`numeric`].
#![warn(missing_docs)]

pub mod complex;
pub mod context;
pub mod error;
pub mod float;
pub mod integer;
pub mod numeric;
pub mod precision;
pub mod rational;

pub use complex::{ComplexKind, ComplexPrecision};
pub use context::{ContextStats, PoolContext};
pub use error::NumericError;
pub use float::FloatKind;
pub use integer::IntegerKind;
pub use numeric::{apply, BinaryOp, Operand, Rank, Value};
pub use precision::{Precision, DEFAULT_PRECISION};
pub use rational::RationalKind;

/// Bits per GMP limb on this target.
pub const LIMB_BITS: usize = std::mem::size_of::<usize>() * 8;

/// Number of limbs needed to hold `bits` bits.
#[must_use]
pub const fn limbs_for_bits(bits: usize) -> usize {
    bits.div_ceil(LIMB_BITS)
}
