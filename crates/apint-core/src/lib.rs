//! # apint-core
//!
//! Sign-magnitude arbitrary-precision integer engine: a limb buffer
//! acquired through a pluggable allocator, carry-propagating add/sub
//! kernels, signed high-level dispatch, and school-book/Karatsuba
//! multiplication.
//!
//! ```
//! use std::sync::Arc;
//! use apint_core::{add, mul_u64, AllocHandle, ApInt};
//! use apint_memory::SystemAllocator;
//!
//! let alloc: AllocHandle = Arc::new(SystemAllocator::new());
//! let a = ApInt::init_u64(alloc.clone(), 2, u64::MAX).unwrap();
//! let b = ApInt::init_u64(alloc.clone(), 2, 1).unwrap();
//!
//! let mut sum = ApInt::init(alloc.clone(), 2).unwrap();
//! add(&mut sum, &a, &b).unwrap();
//! assert_eq!(sum.magnitude(), &[0, 1]);
//!
//! let mut doubled = ApInt::init(alloc, 2).unwrap();
//! mul_u64(&mut doubled, &a, 2).unwrap();
//! assert_eq!(doubled.magnitude(), &[u64::MAX - 1, 1]);
//! ```

pub mod add_sub;
pub mod apint;
pub mod cmp;
pub mod constants;
pub mod error;
pub mod limbs;
pub mod mul;
pub mod op_limit;

// Re-exports
pub use add_sub::{add, add_u64, sub, sub_u64, u64_sub};
pub use apint::{AllocHandle, ApInt, Sign};
pub use cmp::{abs_cmp, abs_ge};
pub use constants::KARATSUBA_THRESHOLD;
pub use error::{ApIntError, Result};
pub use mul::{mul, mul_i64, mul_u64};
