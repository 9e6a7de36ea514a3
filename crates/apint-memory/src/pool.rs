//! Pooling allocator with size classes for limb-buffer reuse.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::alloc::{AllocError, LimbAllocator, SystemAllocator};
use crate::stats::{AllocStats, AtomicAllocStats};

/// Smallest size class handed out, in limbs.
const MIN_CLASS: usize = 4;

/// Pooling [`LimbAllocator`] that keeps released buffers on per-class free
/// lists (power-of-two limb counts) for reuse.
///
/// Pooled buffers are zeroed on release, so `allocate` always returns a
/// zero-filled buffer whether it was recycled or fresh.
pub struct PoolAllocator<A = SystemAllocator> {
    inner: A,
    free_lists: Mutex<HashMap<usize, Vec<Vec<u64>>>>,
    max_pooled_limbs: usize,
    max_per_class: usize,
    stats: AtomicAllocStats,
}

impl PoolAllocator<SystemAllocator> {
    /// Create a pool over the system allocator with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_inner(SystemAllocator::new(), 1 << 24, 32)
    }
}

impl Default for PoolAllocator<SystemAllocator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: LimbAllocator> PoolAllocator<A> {
    /// Create a pool over `inner`, pooling buffers up to `max_pooled_limbs`
    /// with at most `max_per_class` buffers per size class.
    pub fn with_inner(inner: A, max_pooled_limbs: usize, max_per_class: usize) -> Self {
        Self {
            inner,
            free_lists: Mutex::new(HashMap::new()),
            max_pooled_limbs,
            max_per_class,
            stats: AtomicAllocStats::new(),
        }
    }

    /// Round `limbs` up to its size class.
    fn size_class(limbs: usize) -> usize {
        limbs.max(MIN_CLASS).next_power_of_two()
    }

    /// Total number of buffers currently pooled.
    pub fn total_pooled(&self) -> usize {
        self.free_lists.lock().values().map(Vec::len).sum()
    }

    /// Snapshot of usage statistics.
    pub fn stats(&self) -> AllocStats {
        self.stats.snapshot()
    }

    /// Reset usage statistics.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Drop every pooled buffer, returning the memory to the inner allocator.
    pub fn clear(&self) {
        let mut lists = self.free_lists.lock();
        for (_, list) in lists.drain() {
            for buf in list {
                self.inner.release(buf);
            }
        }
    }

    /// Pre-populate the size class covering `limbs` with `count` buffers.
    pub fn warm(&self, limbs: usize, count: usize) -> Result<(), AllocError> {
        let class = Self::size_class(limbs);
        let mut lists = self.free_lists.lock();
        let list = lists.entry(class).or_default();
        while list.len() < count.min(self.max_per_class) {
            list.push(self.inner.allocate(class)?);
        }
        Ok(())
    }
}

impl<A: LimbAllocator> LimbAllocator for PoolAllocator<A> {
    fn allocate(&self, limbs: usize) -> Result<Vec<u64>, AllocError> {
        let class = Self::size_class(limbs);
        if class <= self.max_pooled_limbs {
            let mut lists = self.free_lists.lock();
            if let Some(buf) = lists.get_mut(&class).and_then(Vec::pop) {
                self.stats.record_hit();
                return Ok(buf);
            }
        }
        self.stats.record_miss();
        self.inner.allocate(class).map_err(|err| {
            self.stats.record_failure();
            err
        })
    }

    fn resize(&self, buf: &mut Vec<u64>, new_limbs: usize) -> Result<(), AllocError> {
        if new_limbs <= buf.len() {
            // Shrink to the request's size class so the buffer stays poolable.
            buf.truncate(Self::size_class(new_limbs).min(buf.len()));
            return Ok(());
        }
        let mut grown = self.allocate(new_limbs)?;
        grown[..buf.len()].copy_from_slice(buf);
        let old = std::mem::replace(buf, grown);
        self.release(old);
        Ok(())
    }

    fn release(&self, mut buf: Vec<u64>) {
        let class = buf.len();
        if !class.is_power_of_two() || class < MIN_CLASS || class > self.max_pooled_limbs {
            self.stats.record_eviction();
            self.inner.release(buf);
            return;
        }
        let mut lists = self.free_lists.lock();
        let list = lists.entry(class).or_default();
        if list.len() < self.max_per_class {
            buf.fill(0);
            list.push(buf);
        } else {
            self.stats.record_eviction();
            self.inner.release(buf);
        }
    }
}
