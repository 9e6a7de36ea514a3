//! Atomic allocator statistics for lock-free usage tracking.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of pool allocator usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Buffers served from the pool free lists.
    pub hits: u64,
    /// Buffers that had to come from the inner allocator.
    pub misses: u64,
    /// Buffers dropped instead of pooled (too large or class full).
    pub evictions: u64,
    /// Requests the inner allocator refused.
    pub failures: u64,
}

/// Atomic counters behind [`AllocStats`].
pub struct AtomicAllocStats {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    failures: AtomicU64,
}

impl AtomicAllocStats {
    /// Create new zeroed counters.
    pub fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Take a snapshot of the current counters.
    pub fn snapshot(&self) -> AllocStats {
        AllocStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
    }

    /// Increment the hit counter.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the miss counter.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the eviction counter.
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the failure counter.
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for AtomicAllocStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stats_are_zeroed() {
        let stats = AtomicAllocStats::new();
        assert_eq!(stats.snapshot(), AllocStats::default());
    }

    #[test]
    fn record_and_snapshot() {
        let stats = AtomicAllocStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();
        stats.record_failure();
        let snap = stats.snapshot();
        assert_eq!(snap.hits, 2);
        assert_eq!(snap.misses, 1);
        assert_eq!(snap.evictions, 1);
        assert_eq!(snap.failures, 1);
    }

    #[test]
    fn reset_clears_counters() {
        let stats = AtomicAllocStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_failure();
        stats.reset();
        assert_eq!(stats.snapshot(), AllocStats::default());
    }
}
