#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

use apint_core::{add, sub, AllocHandle, ApInt, Sign};
use apint_memory::SystemAllocator;
use num_bigint::{BigInt, BigUint};

fn decode(data: &[u8]) -> (Vec<u64>, bool, &[u8]) {
    let negative = !data.is_empty() && data[0] & 1 == 1;
    let count = if data.len() > 1 { (data[1] % 8) as usize } else { 0 };
    let mut limbs = Vec::with_capacity(count);
    let mut rest = &data[data.len().min(2)..];
    for _ in 0..count {
        if rest.len() < 8 {
            break;
        }
        let (chunk, tail) = rest.split_at(8);
        limbs.push(u64::from_le_bytes(chunk.try_into().unwrap()));
        rest = tail;
    }
    (limbs, negative, rest)
}

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

fuzz_target!(|data: &[u8]| {
    let alloc: AllocHandle = Arc::new(SystemAllocator::new());
    let (a_limbs, a_neg, rest) = decode(data);
    let (b_limbs, b_neg, _) = decode(rest);

    let a_sign = if a_neg { Sign::Negative } else { Sign::Positive };
    let b_sign = if b_neg { Sign::Negative } else { Sign::Positive };
    let a = ApInt::from_limbs(alloc.clone(), &a_limbs, a_sign).unwrap();
    let b = ApInt::from_limbs(alloc.clone(), &b_limbs, b_sign).unwrap();

    let mut sum = ApInt::init(alloc.clone(), 1).unwrap();
    add(&mut sum, &a, &b).unwrap();
    assert_eq!(to_bigint(&sum), to_bigint(&a) + to_bigint(&b));

    let mut diff = ApInt::init(alloc, 1).unwrap();
    sub(&mut diff, &a, &b).unwrap();
    assert_eq!(to_bigint(&diff), to_bigint(&a) - to_bigint(&b));
});
