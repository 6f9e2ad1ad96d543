//! Errors raised while building numeric results.

use mpcache_pool::PoolError;

use crate::numeric::Rank;

/// Error type for operand dispatch.
#[derive(Debug, thiserror::Error)]
pub enum NumericError {
    /// A pool rejected a hint or configuration.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// A text literal is not a number.
    #[error("invalid numeric literal: {0}")]
    Parse(String),

    /// Exact division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// An operand cannot be represented at the requested rank.
    #[error("cannot convert {from} to {to}")]
    Incompatible {
        /// Rank of the operand.
        from: Rank,
        /// Requested rank.
        to: Rank,
    },
}
