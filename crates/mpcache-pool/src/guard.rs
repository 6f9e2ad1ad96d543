//! Scope-bound ownership of a pooled handle.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::kind::HandleKind;
use crate::pool::HandlePool;

/// A handle checked out of a [`HandlePool`], returned to it on drop.
///
/// The guard is move-only, so a handle is released exactly once.
pub struct Pooled<'p, K: HandleKind> {
    pool: &'p HandlePool<K>,
    handle: Option<K::Handle>,
}

impl<'p, K: HandleKind> Pooled<'p, K> {
    pub(crate) fn new(pool: &'p HandlePool<K>, handle: K::Handle) -> Self {
        Self {
            pool,
            handle: Some(handle),
        }
    }

    /// Detach the handle; it will not go back to the pool.
    #[must_use]
    pub fn into_inner(mut self) -> K::Handle {
        self.handle
            .take()
            .expect("pooled handle is present until drop")
    }

    /// The pool this handle returns to.
    #[must_use]
    pub fn pool(&self) -> &'p HandlePool<K> {
        self.pool
    }
}

impl<K: HandleKind> Deref for Pooled<'_, K> {
    type Target = K::Handle;

    fn deref(&self) -> &K::Handle {
        self.handle
            .as_ref()
            .expect("pooled handle is present until drop")
    }
}

impl<K: HandleKind> DerefMut for Pooled<'_, K> {
    fn deref_mut(&mut self) -> &mut K::Handle {
        self.handle
            .as_mut()
            .expect("pooled handle is present until drop")
    }
}

impl<K: HandleKind> Drop for Pooled<'_, K> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.pool.release(handle);
        }
    }
}

impl<K: HandleKind> fmt::Debug for Pooled<'_, K>
where
    K::Handle: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pooled").field(&**self).finish()
    }
}

impl<K: HandleKind> fmt::Display for Pooled<'_, K>
where
    K::Handle: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}
