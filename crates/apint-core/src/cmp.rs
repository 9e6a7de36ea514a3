//! Magnitude comparison.

use std::cmp::Ordering;

use crate::apint::ApInt;

/// Compare two magnitudes given as trimmed limb slices.
///
/// Lengths decide first (longer wins); equal lengths are scanned from the
/// most-significant limb downward, deciding at the first difference.
#[must_use]
pub fn abs_cmp_limbs(a: &[u64], b: &[u64]) -> Ordering {
    debug_assert!(a.last() != Some(&0) && b.last() != Some(&0));
    match a.len().cmp(&b.len()) {
        Ordering::Equal => {}
        unequal => return unequal,
    }
    for (&la, &lb) in a.iter().rev().zip(b.iter().rev()) {
        match la.cmp(&lb) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
    }
    Ordering::Equal
}

/// Compare `|a|` and `|b|`.
#[must_use]
pub fn abs_cmp(a: &ApInt, b: &ApInt) -> Ordering {
    abs_cmp_limbs(a.magnitude(), b.magnitude())
}

/// `|a| >= |b|`.
#[must_use]
pub fn abs_ge(a: &ApInt, b: &ApInt) -> bool {
    abs_cmp(a, b) != Ordering::Less
}
