//! The capability set a handle kind supplies to the generic pool.

use std::fmt::Debug;

use crate::error::PoolError;

/// Kind-specific primitives the pool needs to manage one type of handle.
///
/// Every `Handle` value produced by these primitives is initialized, so a
/// pool never hands out or stores storage that needs native set-up.
pub trait HandleKind: 'static {
    /// The owned native value.
    type Handle: Send;

    /// Requested characteristics (reserved size, precision) for an acquire.
    type Hint: Copy + Default + Debug + Send + Sync;

    /// Kind name used in logs and statistics.
    const NAME: &'static str;

    /// Create a minimal handle with default characteristics.
    fn init_default() -> Self::Handle;

    /// Create a handle matching `hint`. Called only with validated hints.
    fn init_with_hint(hint: Self::Hint) -> Self::Handle;

    /// Adjust a recycled handle so it matches `hint`.
    fn reinit(handle: &mut Self::Handle, hint: Self::Hint);

    /// Reject hints the native library cannot honor.
    fn validate_hint(hint: Self::Hint) -> Result<(), PoolError> {
        let _ = hint;
        Ok(())
    }

    /// Approximate retained storage of `handle`, in limbs.
    fn capacity_of(handle: &Self::Handle) -> usize;

    /// Free the handle's native storage.
    fn destroy(handle: Self::Handle) {
        drop(handle);
    }
}
