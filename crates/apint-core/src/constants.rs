//! Constants for limb representation and multiplication thresholds.

/// Bits per limb.
pub const LIMB_BITS: usize = 64;

/// Operand length (in limbs) at and above which multiplication switches
/// from the school-book kernel to the Karatsuba split.
///
/// Tunable; re-validate with `cargo bench --bench mul` when changing it.
/// 32 limbs (2048 bits) is where the split starts winning on current
/// x86-64 targets.
pub const KARATSUBA_THRESHOLD: usize = 32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_sane() {
        // The recursion requires both halves of the shorter operand to be
        // non-empty, which needs at least 2 limbs.
        assert!(KARATSUBA_THRESHOLD >= 2);
    }
}
