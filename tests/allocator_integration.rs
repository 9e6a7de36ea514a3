//! Integration tests exercising the engine through pooled and
//! fault-injecting allocators.

use std::sync::Arc;

use apint_core::{add, mul, AllocHandle, ApInt, ApIntError, Sign};
use apint_memory::{FailingAllocator, PoolAllocator, SystemAllocator};

#[test]
fn arithmetic_over_pooled_buffers() {
    let pool = Arc::new(PoolAllocator::new());
    let handle: AllocHandle = pool.clone();

    let a = ApInt::init_u64(handle.clone(), 4, u64::MAX).unwrap();
    let b = ApInt::init_u64(handle.clone(), 4, 1).unwrap();

    let mut sum = ApInt::init(handle.clone(), 4).unwrap();
    add(&mut sum, &a, &b).unwrap();
    assert_eq!(sum.magnitude(), &[0, 1]);

    // Release a value and re-init: the pool should serve the buffer back.
    let mut scratch = ApInt::init(handle.clone(), 4).unwrap();
    scratch.release().unwrap();
    assert_eq!(pool.total_pooled(), 1);
    let _reused = ApInt::init(handle, 4).unwrap();
    assert_eq!(pool.total_pooled(), 0);
    assert!(pool.stats().hits >= 1);
}

#[test]
fn karatsuba_scratch_returns_to_pool() {
    let pool = Arc::new(PoolAllocator::new());
    let handle: AllocHandle = pool.clone();

    let limbs: Vec<u64> = (0..80u64)
        .map(|i| i.wrapping_mul(0x517c_c1b7_2722_0a95) | 1)
        .collect();
    let a = ApInt::from_limbs(handle.clone(), &limbs, Sign::Positive).unwrap();
    let b = ApInt::from_limbs(handle.clone(), &limbs, Sign::Negative).unwrap();

    let mut r = ApInt::init(handle, 160).unwrap();
    mul(&mut r, &a, &b).unwrap();
    assert_eq!(r.sign(), Sign::Negative);

    // The split path acquired and released scratch buffers.
    let stats = pool.stats();
    assert!(stats.misses + stats.hits > 3);
    assert!(pool.total_pooled() > 0);
}

#[test]
fn injected_failure_leaves_destination_bit_identical() {
    // Budget: one allocation for the destination's own buffer, then fail.
    let failing: AllocHandle = Arc::new(FailingAllocator::after(1));
    let mut dst = ApInt::init_u64(failing, 1, 123).unwrap();
    let before = dst.raw_limbs().to_vec();

    let sys: AllocHandle = Arc::new(SystemAllocator::new());
    let a = ApInt::from_limbs(sys.clone(), &[u64::MAX, u64::MAX], Sign::Positive).unwrap();
    let b = ApInt::from_limbs(sys, &[1, 1], Sign::Positive).unwrap();

    let err = add(&mut dst, &a, &b).unwrap_err();
    assert!(matches!(err, ApIntError::OutOfMemory(_)));
    assert_eq!(dst.raw_limbs(), &before[..]);
    assert_eq!(dst.len(), 1);
    assert_eq!(dst.sign(), Sign::Positive);
    assert_eq!(dst.magnitude(), &[123]);
}

#[test]
fn injected_failure_during_multiply_scratch() {
    // Budget covers the operand and destination buffers; the first
    // scratch allocation of the split path fails.
    let failing = Arc::new(FailingAllocator::after(2));
    let handle: AllocHandle = failing;

    let limbs = vec![7u64; 80];
    let a = ApInt::from_limbs(handle.clone(), &limbs, Sign::Positive).unwrap();
    let mut dst = ApInt::init(handle, 160).unwrap();

    let err = mul(&mut dst, &a, &a).unwrap_err();
    assert!(matches!(err, ApIntError::OutOfMemory(_)));
    // The destination still owns a usable, consistent buffer.
    assert!(!dst.is_initialized());
    assert!(dst.capacity() >= 160);
}

#[test]
fn multiply_scratch_failure_keeps_destination_value() {
    // The destination already has a value and enough capacity for the
    // product; the only allocation left is the split path's scratch.
    let failing: AllocHandle = Arc::new(FailingAllocator::after(1));
    let mut dst = ApInt::init_u64(failing, 200, 123).unwrap();
    let before = dst.raw_limbs().to_vec();

    let sys: AllocHandle = Arc::new(SystemAllocator::new());
    let limbs = vec![7u64; 80];
    let a = ApInt::from_limbs(sys, &limbs, Sign::Positive).unwrap();

    let err = mul(&mut dst, &a, &a).unwrap_err();
    assert!(matches!(err, ApIntError::OutOfMemory(_)));
    assert_eq!(dst.magnitude(), &[123]);
    assert_eq!(dst.sign(), Sign::Positive);
    assert_eq!(dst.raw_limbs(), &before[..]);
}

#[test]
fn multiply_scratch_returns_to_pool_on_failure() {
    // Fault injection sits between the engine and the pool: the budget
    // covers the destination, the staging buffer, and the two half-sums of
    // the inner split, then the cross-product scratch fails.
    let pool = Arc::new(PoolAllocator::new());
    let failing: AllocHandle = Arc::new(FailingAllocator::with_inner(pool.clone(), 4));
    let mut dst = ApInt::init(failing, 200).unwrap();

    let sys: AllocHandle = Arc::new(SystemAllocator::new());
    let limbs = vec![3u64; 80];
    let a = ApInt::from_limbs(sys, &limbs, Sign::Positive).unwrap();

    let err = mul(&mut dst, &a, &a).unwrap_err();
    assert!(matches!(err, ApIntError::OutOfMemory(_)));
    // Every scratch buffer acquired before the failure went back to the
    // pool instead of the heap.
    assert_eq!(pool.total_pooled(), 3);
    assert!(!dst.is_initialized());
}

#[test]
fn grow_preserves_low_region_through_pool() {
    let handle: AllocHandle = Arc::new(PoolAllocator::new());
    let mut n = ApInt::from_limbs(handle, &[11, 22, 33], Sign::Positive).unwrap();
    let before = n.magnitude().to_vec();

    let target = n.capacity() + 5;
    n.grow(target).unwrap();
    assert!(n.capacity() >= target);
    assert_eq!(n.magnitude(), &before[..]);
    assert!(n.raw_limbs()[3..].iter().all(|&l| l == 0));
}
