//! The `ApInt` type and its buffer lifecycle.
//!
//! An `ApInt` is a sign-magnitude integer: a buffer of 64-bit limbs
//! (least-significant first) acquired from a [`LimbAllocator`], a count of
//! significant limbs, and a sign. The limb count always indexes the true
//! most-significant nonzero limb; canonical zero is `len = 0` with a
//! positive sign, and limb slots at indices `>= len` are insignificant.
//!
//! Buffers are returned to their allocator by [`ApInt::release`]. Dropping
//! an `ApInt` without releasing it is safe (the buffer falls back to the
//! heap) but bypasses pooled reuse.

use std::sync::Arc;

use tracing::trace;

use apint_memory::LimbAllocator;

use crate::error::{ApIntError, Result};

/// Shared handle to the allocator a buffer was acquired from.
pub type AllocHandle = Arc<dyn LimbAllocator>;

/// Sign of an `ApInt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Zero or positive.
    Positive,
    /// Strictly negative.
    Negative,
    /// No value has been written yet, or the value was released.
    Unset,
}

impl Sign {
    /// The opposite sign. `Unset` stays `Unset`.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
            Self::Unset => Self::Unset,
        }
    }

    /// Whether a value has been written.
    #[must_use]
    pub fn is_set(self) -> bool {
        self != Self::Unset
    }
}

/// Sign-magnitude arbitrary-precision integer.
pub struct ApInt {
    pub(crate) limbs: Vec<u64>,
    pub(crate) len: usize,
    pub(crate) sign: Sign,
    pub(crate) alloc: AllocHandle,
}

impl ApInt {
    /// Create an uninitialized value with room for `capacity` limbs.
    ///
    /// The buffer is zero-filled, `len` is 0 and the sign is [`Sign::Unset`]
    /// until a value is written. A zero `capacity` fails with
    /// [`ApIntError::OutOfMemory`], as does allocator refusal.
    pub fn init(alloc: AllocHandle, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ApIntError::OutOfMemory(apint_memory::AllocError::new(0)));
        }
        let limbs = alloc.allocate(capacity)?;
        Ok(Self {
            limbs,
            len: 0,
            sign: Sign::Unset,
            alloc,
        })
    }

    /// Create a value seeded from an unsigned 64-bit integer.
    pub fn init_u64(alloc: AllocHandle, capacity: usize, value: u64) -> Result<Self> {
        let mut n = Self::init(alloc, capacity)?;
        n.assign_u64(value)?;
        Ok(n)
    }

    /// Create a value seeded from a signed 64-bit integer.
    pub fn init_i64(alloc: AllocHandle, capacity: usize, value: i64) -> Result<Self> {
        let mut n = Self::init_u64(alloc, capacity, value.unsigned_abs())?;
        if value < 0 {
            n.sign = Sign::Negative;
        }
        Ok(n)
    }

    /// Overwrite with an unsigned 64-bit value. Zero normalizes to
    /// `len = 0`. Fails with [`ApIntError::Uninitialized`] on a value whose
    /// buffer was released.
    pub fn assign_u64(&mut self, value: u64) -> Result<()> {
        if self.limbs.is_empty() {
            return Err(ApIntError::Uninitialized);
        }
        self.limbs[0] = value;
        self.len = usize::from(value != 0);
        self.sign = Sign::Positive;
        Ok(())
    }

    /// Create a value from a magnitude given as limbs, least-significant
    /// first, under `sign`.
    pub fn from_limbs(alloc: AllocHandle, limbs: &[u64], sign: Sign) -> Result<Self> {
        let mut n = Self::init(alloc, limbs.len().max(1))?;
        n.assign_limbs(limbs, sign)?;
        Ok(n)
    }

    /// Overwrite with a magnitude given as limbs under `sign`, growing the
    /// buffer if needed. This is the writer surface a string parser builds
    /// values through. Leading-zero limbs are trimmed and a zero magnitude
    /// normalizes to positive.
    pub fn assign_limbs(&mut self, limbs: &[u64], sign: Sign) -> Result<()> {
        if !sign.is_set() {
            return Err(ApIntError::Uninitialized);
        }
        self.assign_magnitude(crate::limbs::trim(limbs), sign)
    }

    /// Number of limb slots currently owned.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.limbs.len()
    }

    /// Number of significant limbs. 0 for zero and for uninitialized values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the value holds no significant limbs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sign of the value.
    #[must_use]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Whether a value has been written and not released.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.sign.is_set()
    }

    /// Whether the value is initialized and zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.sign.is_set() && self.len == 0
    }

    /// The significant limbs, least-significant first.
    #[must_use]
    pub fn magnitude(&self) -> &[u64] {
        &self.limbs[..self.len]
    }

    /// The whole owned buffer, including insignificant slots.
    #[must_use]
    pub fn raw_limbs(&self) -> &[u64] {
        &self.limbs
    }

    /// Handle to the allocator that owns this value's buffer.
    #[must_use]
    pub fn allocator(&self) -> &AllocHandle {
        &self.alloc
    }

    /// Grow the buffer to at least `new_capacity` limbs.
    ///
    /// `new_capacity` must exceed the current capacity. The added region is
    /// zero-filled and the existing limbs are preserved bit-for-bit; on
    /// allocation failure the value is unchanged.
    pub fn grow(&mut self, new_capacity: usize) -> Result<()> {
        let current = self.capacity();
        if new_capacity <= current {
            return Err(ApIntError::InvalidGrow {
                current,
                requested: new_capacity,
            });
        }
        self.alloc.resize(&mut self.limbs, new_capacity)?;
        trace!(from = current, to = self.limbs.len(), "grew limb buffer");
        Ok(())
    }

    /// Shrink the buffer down to the significant limbs (at least one slot
    /// is kept so the value stays usable). Failure leaves the value
    /// unchanged.
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        if !self.sign.is_set() {
            return Err(ApIntError::Uninitialized);
        }
        let target = self.len.max(1);
        if target < self.capacity() {
            let from = self.capacity();
            self.alloc.resize(&mut self.limbs, target)?;
            trace!(from, to = self.limbs.len(), "shrank limb buffer");
        }
        Ok(())
    }

    /// Return the buffer to its allocator and reset to the uninitialized
    /// state. Releasing an already-released value is an error.
    pub fn release(&mut self) -> Result<()> {
        if self.limbs.is_empty() && !self.sign.is_set() {
            return Err(ApIntError::Uninitialized);
        }
        let buf = std::mem::take(&mut self.limbs);
        trace!(limbs = buf.len(), "released limb buffer");
        self.alloc.release(buf);
        self.len = 0;
        self.sign = Sign::Unset;
        Ok(())
    }

    /// Deep copy through the same allocator. Buffers are never shared.
    pub fn try_clone(&self) -> Result<Self> {
        let mut copy = Self::init(self.alloc.clone(), self.capacity().max(1))?;
        copy.limbs[..self.len].copy_from_slice(self.magnitude());
        copy.len = self.len;
        copy.sign = self.sign;
        Ok(copy)
    }

    /// Grow to at least `min_limbs` slots if the buffer is smaller.
    /// Internal pre-sizing hook for the arithmetic dispatch.
    pub(crate) fn ensure_capacity(&mut self, min_limbs: usize) -> Result<()> {
        if self.capacity() < min_limbs {
            let from = self.capacity();
            self.alloc.resize(&mut self.limbs, min_limbs)?;
            trace!(from, to = self.limbs.len(), "pre-sized limb buffer");
        }
        Ok(())
    }

    /// Overwrite with a copy of `src`'s magnitude under `sign`.
    pub(crate) fn assign_magnitude(&mut self, src: &[u64], sign: Sign) -> Result<()> {
        self.ensure_capacity(src.len().max(1))?;
        self.limbs[..src.len()].copy_from_slice(src);
        self.len = crate::limbs::trimmed_len(src);
        self.sign = if self.len == 0 { Sign::Positive } else { sign };
        Ok(())
    }
}

impl std::fmt::Debug for ApInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApInt")
            .field("sign", &self.sign)
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("magnitude", &self.magnitude())
            .finish()
    }
}
