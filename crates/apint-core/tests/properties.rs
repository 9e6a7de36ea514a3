//! Property-based tests comparing the engine against num-bigint.
//!
//! Operands are built through the public limb-assignment surface and every
//! result is checked value-for-value against the reference library.

use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use proptest::collection::vec;
use proptest::prelude::*;

use apint_core::{add, mul, mul_u64, sub, AllocHandle, ApInt, Sign};
use apint_memory::SystemAllocator;

fn alloc() -> AllocHandle {
    Arc::new(SystemAllocator::new())
}

fn build(limbs: &[u64], negative: bool) -> ApInt {
    let sign = if negative {
        Sign::Negative
    } else {
        Sign::Positive
    };
    ApInt::from_limbs(alloc(), limbs, sign).unwrap()
}

#[allow(clippy::cast_possible_truncation)]
fn to_bigint(n: &ApInt) -> BigInt {
    let digits: Vec<u32> = n
        .magnitude()
        .iter()
        .flat_map(|&l| [l as u32, (l >> 32) as u32])
        .collect();
    let magnitude = BigInt::from(BigUint::new(digits));
    if n.sign() == Sign::Negative {
        -magnitude
    } else {
        magnitude
    }
}

fn operand() -> impl Strategy<Value = (Vec<u64>, bool)> {
    (vec(any::<u64>(), 0..6), any::<bool>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// add agrees with the reference library for any signs and magnitudes.
    #[test]
    fn add_matches_oracle((al, an) in operand(), (bl, bn) in operand()) {
        let a = build(&al, an);
        let b = build(&bl, bn);
        let mut r = ApInt::init(alloc(), 1).unwrap();
        add(&mut r, &a, &b).unwrap();
        prop_assert_eq!(to_bigint(&r), to_bigint(&a) + to_bigint(&b));
    }

    /// sub agrees with the reference library for any signs and magnitudes.
    #[test]
    fn sub_matches_oracle((al, an) in operand(), (bl, bn) in operand()) {
        let a = build(&al, an);
        let b = build(&bl, bn);
        let mut r = ApInt::init(alloc(), 1).unwrap();
        sub(&mut r, &a, &b).unwrap();
        prop_assert_eq!(to_bigint(&r), to_bigint(&a) - to_bigint(&b));
    }

    /// mul agrees with the reference library for any signs and magnitudes.
    #[test]
    fn mul_matches_oracle((al, an) in operand(), (bl, bn) in operand()) {
        let a = build(&al, an);
        let b = build(&bl, bn);
        let mut r = ApInt::init(alloc(), 1).unwrap();
        mul(&mut r, &a, &b).unwrap();
        prop_assert_eq!(to_bigint(&r), to_bigint(&a) * to_bigint(&b));
    }

    /// add(a, b) then sub(result, b) recovers a exactly.
    #[test]
    fn add_sub_round_trip((al, an) in operand(), (bl, bn) in operand()) {
        let a = build(&al, an);
        let b = build(&bl, bn);
        let mut sum = ApInt::init(alloc(), 1).unwrap();
        add(&mut sum, &a, &b).unwrap();
        let mut back = ApInt::init(alloc(), 1).unwrap();
        sub(&mut back, &sum, &b).unwrap();
        prop_assert_eq!(to_bigint(&back), to_bigint(&a));
    }

    /// Addition is commutative, limb-for-limb and sign-for-sign.
    #[test]
    fn add_commutes((al, an) in operand(), (bl, bn) in operand()) {
        let a = build(&al, an);
        let b = build(&bl, bn);
        let mut ab = ApInt::init(alloc(), 1).unwrap();
        let mut ba = ApInt::init(alloc(), 1).unwrap();
        add(&mut ab, &a, &b).unwrap();
        add(&mut ba, &b, &a).unwrap();
        prop_assert_eq!(ab.magnitude(), ba.magnitude());
        prop_assert_eq!(ab.sign(), ba.sign());
    }

    /// Multiplication is commutative, limb-for-limb and sign-for-sign.
    #[test]
    fn mul_commutes((al, an) in operand(), (bl, bn) in operand()) {
        let a = build(&al, an);
        let b = build(&bl, bn);
        let mut ab = ApInt::init(alloc(), 1).unwrap();
        let mut ba = ApInt::init(alloc(), 1).unwrap();
        mul(&mut ab, &a, &b).unwrap();
        mul(&mut ba, &b, &a).unwrap();
        prop_assert_eq!(ab.magnitude(), ba.magnitude());
        prop_assert_eq!(ab.sign(), ba.sign());
    }

    /// add(a, a) equals mul(a, 2) in magnitude and sign.
    #[test]
    fn doubling_matches_scalar_multiply((al, an) in operand()) {
        let a = build(&al, an);
        let mut doubled = ApInt::init(alloc(), 1).unwrap();
        add(&mut doubled, &a, &a).unwrap();
        let mut scaled = ApInt::init(alloc(), 1).unwrap();
        mul_u64(&mut scaled, &a, 2).unwrap();
        prop_assert_eq!(doubled.magnitude(), scaled.magnitude());
        prop_assert_eq!(doubled.sign(), scaled.sign());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    /// Operands long enough for the Karatsuba split still agree with the
    /// reference library.
    #[test]
    fn karatsuba_sized_mul_matches_oracle(
        al in vec(any::<u64>(), 64..90),
        bl in vec(any::<u64>(), 64..90),
    ) {
        let a = build(&al, false);
        let b = build(&bl, true);
        let mut r = ApInt::init(alloc(), 1).unwrap();
        mul(&mut r, &a, &b).unwrap();
        prop_assert_eq!(to_bigint(&r), to_bigint(&a) * to_bigint(&b));
    }
}
