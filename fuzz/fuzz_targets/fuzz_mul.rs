#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

use apint_core::{mul, AllocHandle, ApInt, Sign};
use apint_memory::{PoolAllocator, SystemAllocator};
use num_bigint::BigUint;

fn to_biguint(limbs: &[u64]) -> BigUint {
    BigUint::new(
        limbs
            .iter()
            .flat_map(|&l| [l as u32, (l >> 32) as u32])
            .collect(),
    )
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    // First byte splits the remaining bytes into the two operands; limb
    // counts are capped so long inputs reach the Karatsuba path quickly.
    let split = (data[0] as usize).min(data.len() - 1);
    let (a_bytes, b_bytes) = data[1..].split_at(split);

    let a_limbs: Vec<u64> = a_bytes
        .chunks_exact(8)
        .take(96)
        .map(|c| u64::from_le_bytes(c.try_into().unwrap()))
        .collect();
    let b_limbs: Vec<u64> = b_bytes
        .chunks_exact(8)
        .take(96)
        .map(|c| u64::from_le_bytes(c.try_into().unwrap()))
        .collect();

    let alloc: AllocHandle = Arc::new(PoolAllocator::with_inner(
        SystemAllocator::new(),
        1 << 20,
        16,
    ));
    let a = ApInt::from_limbs(alloc.clone(), &a_limbs, Sign::Positive).unwrap();
    let b = ApInt::from_limbs(alloc.clone(), &b_limbs, Sign::Negative).unwrap();

    let mut r = ApInt::init(alloc, 1).unwrap();
    mul(&mut r, &a, &b).unwrap();

    assert_eq!(to_biguint(r.magnitude()), to_biguint(&a_limbs) * to_biguint(&b_limbs));
    let expect_negative = !a.is_zero() && !b.is_zero();
    assert_eq!(r.sign() == Sign::Negative, expect_negative);
});
