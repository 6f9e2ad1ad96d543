//! Error handling and exit codes.

use mpcache_gmp::NumericError;
use mpcache_pool::PoolError;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
}

/// Map an application error to the process exit code.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(pool) = cause.downcast_ref::<PoolError>() {
            return pool_exit_code(pool);
        }
        if let Some(NumericError::Pool(pool)) = cause.downcast_ref::<NumericError>() {
            return pool_exit_code(pool);
        }
    }
    exit_codes::ERROR_GENERIC
}

fn pool_exit_code(err: &PoolError) -> i32 {
    match err {
        PoolError::InvalidArgument(_) => exit_codes::ERROR_CONFIG,
        PoolError::AllocationFailure(_) => exit_codes::ERROR_GENERIC,
    }
}
