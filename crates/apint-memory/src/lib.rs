//! # apint-memory
//!
//! Limb-buffer allocation for the `apint` workspace.
//!
//! Provides the [`LimbAllocator`] trait every big-integer buffer is acquired
//! through, a system-backed default, a size-classed pooling allocator with
//! usage statistics, and a fault-injecting allocator for out-of-memory tests.
#![warn(missing_docs)]

pub mod alloc;
pub mod failing;
pub mod pool;
pub mod stats;

pub use alloc::{AllocError, LimbAllocator, SystemAllocator};
pub use failing::FailingAllocator;
pub use pool::PoolAllocator;
pub use stats::{AllocStats, AtomicAllocStats};
