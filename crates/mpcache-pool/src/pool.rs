//! Bounded LIFO pool of pre-initialized handles.

use std::fmt;
use std::marker::PhantomData;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::guard::Pooled;
use crate::kind::HandleKind;
use crate::stats::{AtomicPoolStats, PoolStats};

struct PoolState<H> {
    slots: Vec<H>,
    config: PoolConfig,
}

/// A freshly initialized set of slots, built but not yet installed.
///
/// Produced by [`HandlePool::stage`] and consumed by [`HandlePool::commit`].
/// Dropping it without committing frees the staged handles.
pub struct Staged<K: HandleKind> {
    config: PoolConfig,
    slots: Vec<K::Handle>,
}

impl<K: HandleKind> Staged<K> {
    /// Bounds that will take effect on commit.
    #[must_use]
    pub fn config(&self) -> PoolConfig {
        self.config
    }

    /// Number of staged handles (always `config().max_count()`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no handles were staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<K: HandleKind> Drop for Staged<K> {
    fn drop(&mut self) {
        self.slots.drain(..).for_each(K::destroy);
    }
}

/// Free-list cache of initialized handles of one kind.
///
/// Handles are reused last-in first-out. The pool retains at most
/// `max_count` handles, and a released handle whose capacity exceeds
/// `max_capacity` is destroyed and replaced by a minimal one.
///
/// The slot stack and bounds sit behind one mutex that is held only for the
/// push, pop or swap itself; native initialization and destruction happen
/// outside it.
pub struct HandlePool<K: HandleKind> {
    state: Mutex<PoolState<K::Handle>>,
    stats: AtomicPoolStats,
    _kind: PhantomData<fn() -> K>,
}

impl<K: HandleKind> HandlePool<K> {
    /// Create a pool pre-warmed with `config.max_count()` fresh handles.
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let pool = Self::empty(config);
        let staged = pool.stage(config)?;
        pool.commit(staged);
        Ok(pool)
    }

    /// Create an empty pool with the given bounds.
    #[must_use]
    pub fn empty(config: PoolConfig) -> Self {
        Self {
            state: Mutex::new(PoolState {
                slots: Vec::new(),
                config,
            }),
            stats: AtomicPoolStats::new(),
            _kind: PhantomData,
        }
    }

    /// Discard the pooled handles and refill the pool under new bounds.
    ///
    /// Either the whole reconfiguration happens or, on error, the previous
    /// bounds and contents stay untouched.
    pub fn configure(&self, max_count: usize, max_capacity: usize) -> Result<(), PoolError> {
        let config = PoolConfig::new(max_count, max_capacity)?;
        let staged = self.stage(config)?;
        self.commit(staged);
        Ok(())
    }

    /// Build `config.max_count()` fresh handles without touching the pool.
    pub fn stage(&self, config: PoolConfig) -> Result<Staged<K>, PoolError> {
        let count = config.max_count();
        let mut slots = Vec::new();
        slots.try_reserve_exact(count).map_err(|e| {
            PoolError::AllocationFailure(format!("reserving {count} {} slots: {e}", K::NAME))
        })?;
        slots.extend(std::iter::repeat_with(K::init_default).take(count));
        Ok(Staged { config, slots })
    }

    /// Install staged slots and bounds, destroying the previous contents.
    pub fn commit(&self, mut staged: Staged<K>) {
        let config = staged.config;
        let previous = {
            let mut state = self.state.lock();
            state.config = config;
            std::mem::replace(&mut state.slots, std::mem::take(&mut staged.slots))
        };
        debug!(
            kind = K::NAME,
            max_count = config.max_count(),
            max_capacity = config.max_capacity(),
            discarded = previous.len(),
            "pool reconfigured"
        );
        previous.into_iter().for_each(K::destroy);
    }

    /// Current `(max_count, max_capacity)` bounds.
    #[must_use]
    pub fn current_config(&self) -> PoolConfig {
        self.state.lock().config
    }

    /// Take a handle adjusted to `hint`, recycling the most recently
    /// released one when available.
    pub fn acquire(&self, hint: K::Hint) -> Result<K::Handle, PoolError> {
        K::validate_hint(hint)?;
        Ok(self.acquire_valid(hint))
    }

    /// Take a handle with default characteristics.
    ///
    /// Kinds accept their default hint, so this cannot fail.
    pub fn acquire_default(&self) -> K::Handle {
        self.acquire_valid(K::Hint::default())
    }

    fn acquire_valid(&self, hint: K::Hint) -> K::Handle {
        let recycled = self.state.lock().slots.pop();
        if let Some(mut handle) = recycled {
            self.stats.record_hit();
            K::reinit(&mut handle, hint);
            handle
        } else {
            self.stats.record_miss();
            K::init_with_hint(hint)
        }
    }

    /// Like [`acquire`](Self::acquire), wrapped in a guard that releases the
    /// handle back to this pool when dropped.
    pub fn checkout(&self, hint: K::Hint) -> Result<Pooled<'_, K>, PoolError> {
        self.acquire(hint).map(|handle| Pooled::new(self, handle))
    }

    /// Guarded handle with default characteristics.
    pub fn checkout_default(&self) -> Pooled<'_, K> {
        Pooled::new(self, self.acquire_default())
    }

    /// Give a handle back to the pool.
    ///
    /// The handle is kept as-is when there is room and its capacity is
    /// within `max_capacity`. An oversized handle is destroyed and a minimal
    /// one takes its slot. When the pool is full the handle is destroyed.
    pub fn release(&self, handle: K::Handle) {
        let capacity = K::capacity_of(&handle);
        let mut state = self.state.lock();
        let config = state.config;
        if state.slots.len() >= config.max_count() {
            drop(state);
            self.stats.record_discard();
            trace!(kind = K::NAME, capacity, "pool full, handle destroyed");
            K::destroy(handle);
        } else if capacity <= config.max_capacity() {
            state.slots.push(handle);
        } else {
            drop(state);
            self.stats.record_eviction();
            trace!(
                kind = K::NAME,
                capacity,
                max_capacity = config.max_capacity(),
                "oversized handle replaced"
            );
            K::destroy(handle);
            self.push_fresh();
        }
    }

    /// Push a minimal handle in place of an evicted one, unless another
    /// release filled the pool meanwhile.
    fn push_fresh(&self) {
        let fresh = K::init_default();
        let mut state = self.state.lock();
        if state.slots.len() < state.config.max_count() {
            state.slots.push(fresh);
        } else {
            drop(state);
            K::destroy(fresh);
        }
    }

    /// Number of handles currently available.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().slots.len()
    }

    /// Whether no handle is available for reuse.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().slots.is_empty()
    }

    /// Snapshot of the usage counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.stats.snapshot()
    }

    /// Zero the usage counters.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Destroy every pooled handle. Bounds are kept.
    pub fn clear(&self) {
        self.drain().into_iter().for_each(K::destroy);
    }

    /// Remove every pooled handle and hand them to the caller.
    pub fn drain(&self) -> Vec<K::Handle> {
        std::mem::take(&mut self.state.lock().slots)
    }
}

impl<K: HandleKind> Drop for HandlePool<K> {
    fn drop(&mut self) {
        self.state.get_mut().slots.drain(..).for_each(K::destroy);
    }
}

impl<K: HandleKind> fmt::Debug for HandlePool<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("HandlePool")
            .field("kind", &K::NAME)
            .field("len", &state.slots.len())
            .field("config", &state.config)
            .finish_non_exhaustive()
    }
}
