//! # mpcache-pool
//!
//! Bounded free-list pools for pre-initialized native value handles.
//!
//! A [`HandlePool`] keeps a LIFO stack of handles of one [`HandleKind`],
//! bounded by a maximum count and by the maximum capacity a recycled handle
//! may retain. The kind supplies the capability set (initialize, adjust to a
//! hint, measure, destroy); the pool supplies the bookkeeping.
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod guard;
pub mod kind;
pub mod pool;
pub mod stats;

pub use config::{
    PoolConfig, DEFAULT_MAX_CAPACITY, DEFAULT_MAX_COUNT, MAX_CAPACITY_LIMIT, MAX_COUNT_LIMIT,
};
pub use error::PoolError;
pub use guard::Pooled;
pub use kind::HandleKind;
pub use pool::{HandlePool, Staged};
pub use stats::PoolStats;
