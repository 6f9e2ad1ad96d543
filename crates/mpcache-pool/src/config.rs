//! Pool bounds and their validation.

use serde::Serialize;

use crate::error::PoolError;

/// Largest accepted `max_count`.
pub const MAX_COUNT_LIMIT: usize = 1000;

/// Largest accepted `max_capacity`, in limbs.
pub const MAX_CAPACITY_LIMIT: usize = 16_384;

/// Number of handles retained by a freshly configured pool.
pub const DEFAULT_MAX_COUNT: usize = 100;

/// Largest capacity (in limbs) a recycled handle may keep by default.
pub const DEFAULT_MAX_CAPACITY: usize = 128;

/// Validated pool bounds.
///
/// A `PoolConfig` can only be built through [`PoolConfig::new`] or the
/// `TryFrom` conversions, so holding one means both bounds are in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PoolConfig {
    max_count: usize,
    max_capacity: usize,
}

impl PoolConfig {
    /// Validate and build a configuration.
    pub fn new(max_count: usize, max_capacity: usize) -> Result<Self, PoolError> {
        if max_count > MAX_COUNT_LIMIT {
            return Err(PoolError::InvalidArgument(format!(
                "cache size must be between 0 and {MAX_COUNT_LIMIT}, got {max_count}"
            )));
        }
        if max_capacity > MAX_CAPACITY_LIMIT {
            return Err(PoolError::InvalidArgument(format!(
                "object size must be between 0 and {MAX_CAPACITY_LIMIT}, got {max_capacity}"
            )));
        }
        Ok(Self {
            max_count,
            max_capacity,
        })
    }

    /// Maximum number of retained handles.
    #[must_use]
    pub const fn max_count(&self) -> usize {
        self.max_count
    }

    /// Maximum capacity a handle may have and still be retained.
    #[must_use]
    pub const fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// The bounds as a `(max_count, max_capacity)` pair.
    #[must_use]
    pub const fn as_tuple(&self) -> (usize, usize) {
        (self.max_count, self.max_capacity)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_COUNT,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

impl From<PoolConfig> for (usize, usize) {
    fn from(config: PoolConfig) -> Self {
        config.as_tuple()
    }
}

impl TryFrom<(usize, usize)> for PoolConfig {
    type Error = PoolError;

    fn try_from((max_count, max_capacity): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(max_count, max_capacity)
    }
}

/// Signed bounds, as they arrive from command lines and environment variables.
impl TryFrom<(i64, i64)> for PoolConfig {
    type Error = PoolError;

    fn try_from((max_count, max_capacity): (i64, i64)) -> Result<Self, Self::Error> {
        let count = usize::try_from(max_count).map_err(|_| {
            PoolError::InvalidArgument(format!(
                "cache size must be between 0 and {MAX_COUNT_LIMIT}, got {max_count}"
            ))
        })?;
        let capacity = usize::try_from(max_capacity).map_err(|_| {
            PoolError::InvalidArgument(format!(
                "object size must be between 0 and {MAX_CAPACITY_LIMIT}, got {max_capacity}"
            ))
        })?;
        Self::new(count, capacity)
    }
}
