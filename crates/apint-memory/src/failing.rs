//! Fault-injecting allocator for out-of-memory testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::alloc::{AllocError, LimbAllocator, SystemAllocator};

/// Allocator wrapper that starts refusing requests after a programmable
/// number of successful allocations.
///
/// `allocate` and growing `resize` calls count against the budget; shrinks
/// and releases always succeed. Used to verify that operations hit by an
/// allocation failure leave their destination untouched.
pub struct FailingAllocator<A = SystemAllocator> {
    inner: A,
    remaining: AtomicUsize,
}

impl FailingAllocator<SystemAllocator> {
    /// Fail every request after the first `successes` succeed.
    #[must_use]
    pub fn after(successes: usize) -> Self {
        Self::with_inner(SystemAllocator::new(), successes)
    }

    /// Fail every request immediately.
    #[must_use]
    pub fn always() -> Self {
        Self::after(0)
    }
}

impl<A: LimbAllocator> FailingAllocator<A> {
    /// Wrap `inner`, allowing `successes` fallible calls before failing.
    pub fn with_inner(inner: A, successes: usize) -> Self {
        Self {
            inner,
            remaining: AtomicUsize::new(successes),
        }
    }

    /// Number of fallible calls still allowed to succeed.
    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Relaxed)
    }

    fn consume(&self, limbs: usize) -> Result<(), AllocError> {
        let mut budget = self.remaining.load(Ordering::Relaxed);
        loop {
            if budget == 0 {
                return Err(AllocError::new(limbs));
            }
            match self.remaining.compare_exchange_weak(
                budget,
                budget - 1,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Ok(()),
                Err(actual) => budget = actual,
            }
        }
    }
}

impl<A: LimbAllocator> LimbAllocator for FailingAllocator<A> {
    fn allocate(&self, limbs: usize) -> Result<Vec<u64>, AllocError> {
        self.consume(limbs)?;
        self.inner.allocate(limbs)
    }

    fn resize(&self, buf: &mut Vec<u64>, new_limbs: usize) -> Result<(), AllocError> {
        if new_limbs > buf.len() {
            self.consume(new_limbs)?;
        }
        self.inner.resize(buf, new_limbs)
    }

    fn release(&self, buf: Vec<u64>) {
        self.inner.release(buf);
    }
}
