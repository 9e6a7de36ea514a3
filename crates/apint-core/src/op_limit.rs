//! Upper bounds on result limb counts, used to pre-size destination
//! buffers once instead of reallocating mid-operation.

use crate::apint::ApInt;

/// Limbs an addition (or subtraction) result may need: the longer operand
/// plus one carry limb.
#[must_use]
pub fn add_limit(a: &ApInt, b: &ApInt) -> usize {
    add_limit_limbs(a.magnitude(), b.magnitude())
}

/// [`add_limit`] over raw trimmed magnitudes.
#[must_use]
pub fn add_limit_limbs(a: &[u64], b: &[u64]) -> usize {
    a.len().max(b.len()) + 1
}

/// Limbs a product may need. The product of `m`- and `n`-limb magnitudes
/// is below `2^(64(m+n))`, so `m + n` limbs always suffice.
#[must_use]
pub fn mul_limit(a: &ApInt, b: &ApInt) -> usize {
    mul_limit_limbs(a.magnitude(), b.magnitude())
}

/// [`mul_limit`] over raw trimmed magnitudes.
#[must_use]
pub fn mul_limit_limbs(a: &[u64], b: &[u64]) -> usize {
    a.len() + b.len()
}

/// Limbs a square may need.
#[must_use]
pub fn sqr_limit(a: &ApInt) -> usize {
    2 * a.len()
}

/// Coarse upper bound on the limbs `base^exponent` may need, for an
/// exponent measured by its own limb count.
#[must_use]
pub fn exp_limit(base: &ApInt, exponent: &ApInt) -> usize {
    base.len() * exponent.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apint::AllocHandle;
    use apint_memory::SystemAllocator;
    use std::sync::Arc;

    fn alloc() -> AllocHandle {
        Arc::new(SystemAllocator::new())
    }

    fn with_len(len: usize) -> ApInt {
        ApInt::from_limbs(alloc(), &vec![1; len], crate::Sign::Positive).unwrap()
    }

    #[test]
    fn add_limit_is_longer_plus_one() {
        assert_eq!(add_limit(&with_len(3), &with_len(5)), 6);
        assert_eq!(add_limit(&with_len(5), &with_len(3)), 6);
        assert_eq!(add_limit(&with_len(1), &with_len(1)), 2);
    }

    #[test]
    fn mul_limit_is_sum_of_lengths() {
        assert_eq!(mul_limit(&with_len(3), &with_len(5)), 8);
        assert_eq!(mul_limit(&with_len(1), &with_len(1)), 2);
    }

    #[test]
    fn mul_limit_is_tight_for_max_limbs() {
        // (2^64 - 1)^2 fits exactly in 2 limbs; see the multiply tests.
        assert_eq!(mul_limit(&with_len(1), &with_len(1)), 2);
    }

    #[test]
    fn slice_variants_agree() {
        assert_eq!(add_limit_limbs(&[1; 3], &[1; 5]), 6);
        assert_eq!(add_limit_limbs(&[], &[]), 1);
        assert_eq!(mul_limit_limbs(&[1; 3], &[1; 5]), 8);
    }

    #[test]
    fn sqr_limit_doubles() {
        assert_eq!(sqr_limit(&with_len(4)), 8);
    }

    #[test]
    fn exp_limit_multiplies_lengths() {
        assert_eq!(exp_limit(&with_len(4), &with_len(2)), 8);
    }
}
