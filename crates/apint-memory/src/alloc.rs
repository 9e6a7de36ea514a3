//! Allocator trait and the system-backed default.

use std::sync::Arc;

/// Error returned when a limb-buffer allocation cannot be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("allocation of {limbs} limbs failed")]
pub struct AllocError {
    /// Number of limbs the failed request asked for.
    pub limbs: usize,
}

impl AllocError {
    /// Create an error for a request of `limbs` limbs.
    #[must_use]
    pub fn new(limbs: usize) -> Self {
        Self { limbs }
    }
}

/// Source of limb buffers for big-integer storage.
///
/// Every `ApInt` holds a handle to the allocator that produced its buffer,
/// so a buffer is always released to the allocator it came from. A handle
/// supplies allocate, resize, and release together; there is no way to
/// install a partial set.
pub trait LimbAllocator: Send + Sync {
    /// Allocate a zero-filled buffer of at least `limbs` slots.
    ///
    /// Implementations may round the request up (the pooled allocator hands
    /// out size-class buffers); callers take `buf.len()` as the capacity
    /// actually granted.
    fn allocate(&self, limbs: usize) -> Result<Vec<u64>, AllocError>;

    /// Resize `buf` to at least `new_limbs` slots, zero-filling any slots
    /// gained and preserving `[0, min(old, new))` bit-for-bit. On error
    /// `buf` is unchanged.
    fn resize(&self, buf: &mut Vec<u64>, new_limbs: usize) -> Result<(), AllocError>;

    /// Return a buffer no longer in use.
    fn release(&self, buf: Vec<u64>);
}

impl<A: LimbAllocator + ?Sized> LimbAllocator for Arc<A> {
    fn allocate(&self, limbs: usize) -> Result<Vec<u64>, AllocError> {
        (**self).allocate(limbs)
    }

    fn resize(&self, buf: &mut Vec<u64>, new_limbs: usize) -> Result<(), AllocError> {
        (**self).resize(buf, new_limbs)
    }

    fn release(&self, buf: Vec<u64>) {
        (**self).release(buf);
    }
}

/// Default allocator backed by the global heap.
///
/// Allocation failure is reported through `Vec::try_reserve_exact` rather
/// than aborting, so callers see [`AllocError`] instead of a crash.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;

impl SystemAllocator {
    /// Create a system allocator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LimbAllocator for SystemAllocator {
    fn allocate(&self, limbs: usize) -> Result<Vec<u64>, AllocError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(limbs)
            .map_err(|_| AllocError::new(limbs))?;
        buf.resize(limbs, 0);
        Ok(buf)
    }

    fn resize(&self, buf: &mut Vec<u64>, new_limbs: usize) -> Result<(), AllocError> {
        if new_limbs > buf.len() {
            let additional = new_limbs - buf.len();
            buf.try_reserve_exact(additional)
                .map_err(|_| AllocError::new(new_limbs))?;
            buf.resize(new_limbs, 0);
        } else {
            buf.truncate(new_limbs);
            buf.shrink_to_fit();
        }
        Ok(())
    }

    fn release(&self, buf: Vec<u64>) {
        drop(buf);
    }
}
