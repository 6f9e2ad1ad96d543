//! Error conditions raised by pool operations.

/// Error type for pool configuration and acquisition.
///
/// Releasing a handle twice, or into a pool it did not come from, cannot be
/// expressed: handles move in and out by value, so there is no misuse
/// variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// A bound or hint lies outside its allowed range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Storage for the pool's slots could not be reserved.
    #[error("allocation failure: {0}")]
    AllocationFailure(String),
}
