//! Carry-propagating add/sub kernels and the signed high-level dispatch.
//!
//! The kernels work on raw magnitudes with the longer operand first. The
//! dispatch resolves which operand is larger, derives the absolute
//! operation from the sign combination, pre-sizes the destination, and
//! fixes up the result sign and length:
//!
//! - requested addition: same signs add magnitudes, differing signs
//!   subtract the smaller magnitude from the larger;
//! - requested subtraction: the right operand's sign is flipped first,
//!   then the same table applies.

use std::cmp::Ordering;

use crate::apint::{ApInt, Sign};
use crate::cmp::abs_cmp_limbs;
use crate::error::{ApIntError, Result};
use crate::limbs::{add_with_carry, sub_with_borrow, trimmed_len};
use crate::op_limit::add_limit_limbs;

/// Absolute-addition kernel: `dst = max + min` over magnitudes.
///
/// Processes `min.len()` limb pairs, then propagates the residual carry
/// through the remaining limbs of `max`; a carry surviving past the most
/// significant limb is written as one extra limb. Returns the result
/// length. Requires `max.len() >= min.len()` and `dst.len() > max.len()`.
pub(crate) fn abs_add(dst: &mut [u64], max: &[u64], min: &[u64]) -> usize {
    debug_assert!(max.len() >= min.len());
    debug_assert!(dst.len() > max.len());

    let mut carry = 0;
    for (i, (&hi, &lo)) in max.iter().zip(min).enumerate() {
        let (sum, c) = add_with_carry(hi, lo, carry);
        dst[i] = sum;
        carry = c;
    }
    for (i, &hi) in max.iter().enumerate().skip(min.len()) {
        let (sum, c) = add_with_carry(hi, 0, carry);
        dst[i] = sum;
        carry = c;
    }
    if carry != 0 {
        dst[max.len()] = carry;
        max.len() + 1
    } else {
        max.len()
    }
}

/// Absolute-subtraction kernel: `dst = max - min` over magnitudes.
///
/// The caller guarantees `|max| >= |min|`; the final borrow is asserted to
/// be zero in debug builds and the result is mathematically wrong if the
/// precondition is violated. Returns the trimmed result length. Requires
/// `max.len() >= min.len()` and `dst.len() >= max.len()`.
pub(crate) fn abs_sub(dst: &mut [u64], max: &[u64], min: &[u64]) -> usize {
    debug_assert!(max.len() >= min.len());
    debug_assert!(dst.len() >= max.len());

    let mut borrow = 0;
    for (i, (&hi, &lo)) in max.iter().zip(min).enumerate() {
        let (diff, b) = sub_with_borrow(hi, lo, borrow);
        dst[i] = diff;
        borrow = b;
    }
    for (i, &hi) in max.iter().enumerate().skip(min.len()) {
        let (diff, b) = sub_with_borrow(hi, 0, borrow);
        dst[i] = diff;
        borrow = b;
    }
    debug_assert_eq!(borrow, 0, "abs_sub requires |max| >= |min|");
    trimmed_len(&dst[..max.len()])
}

/// `dst = a + b` with sign-magnitude semantics.
pub fn add(dst: &mut ApInt, a: &ApInt, b: &ApInt) -> Result<()> {
    check_operands(dst, &[a, b])?;
    dispatch(dst, a.magnitude(), a.sign(), b.magnitude(), b.sign())
}

/// `dst = a - b` with sign-magnitude semantics.
pub fn sub(dst: &mut ApInt, a: &ApInt, b: &ApInt) -> Result<()> {
    check_operands(dst, &[a, b])?;
    dispatch(dst, a.magnitude(), a.sign(), b.magnitude(), b.sign().flipped())
}

/// `dst = a + value` for an unsigned scalar.
pub fn add_u64(dst: &mut ApInt, a: &ApInt, value: u64) -> Result<()> {
    check_operands(dst, &[a])?;
    let limb = [value];
    let mag = &limb[..usize::from(value != 0)];
    dispatch(dst, a.magnitude(), a.sign(), mag, Sign::Positive)
}

/// `dst = a - value` for an unsigned scalar.
pub fn sub_u64(dst: &mut ApInt, a: &ApInt, value: u64) -> Result<()> {
    check_operands(dst, &[a])?;
    let limb = [value];
    let mag = &limb[..usize::from(value != 0)];
    dispatch(dst, a.magnitude(), a.sign(), mag, Sign::Negative)
}

/// `dst = value - a` for an unsigned scalar.
pub fn u64_sub(dst: &mut ApInt, value: u64, a: &ApInt) -> Result<()> {
    check_operands(dst, &[a])?;
    let limb = [value];
    let mag = &limb[..usize::from(value != 0)];
    dispatch(dst, mag, Sign::Positive, a.magnitude(), a.sign().flipped())
}

/// Reject uninitialized sources and destinations without a live buffer.
fn check_operands(dst: &ApInt, sources: &[&ApInt]) -> Result<()> {
    if dst.capacity() == 0 || sources.iter().any(|s| !s.is_initialized()) {
        return Err(ApIntError::Uninitialized);
    }
    Ok(())
}

/// Sign-resolution and kernel dispatch over raw magnitudes.
fn dispatch(
    dst: &mut ApInt,
    a_mag: &[u64],
    a_sign: Sign,
    b_mag: &[u64],
    b_sign: Sign,
) -> Result<()> {
    // A zero operand reduces to a signed copy of the other.
    if b_mag.is_empty() {
        return dst.assign_magnitude(a_mag, a_sign);
    }
    if a_mag.is_empty() {
        return dst.assign_magnitude(b_mag, b_sign);
    }

    let (max_mag, max_sign, min_mag, min_sign) =
        if abs_cmp_limbs(a_mag, b_mag) != Ordering::Less {
            (a_mag, a_sign, b_mag, b_sign)
        } else {
            (b_mag, b_sign, a_mag, a_sign)
        };

    // Pre-size once from the estimator; the extra carry limb also covers
    // the subtraction case.
    dst.ensure_capacity(add_limit_limbs(max_mag, min_mag))?;

    if max_sign == min_sign {
        dst.len = abs_add(&mut dst.limbs, max_mag, min_mag);
        dst.sign = max_sign;
    } else {
        // Absolute subtraction; the sign of the larger magnitude wins.
        dst.len = abs_sub(&mut dst.limbs, max_mag, min_mag);
        dst.sign = if dst.len == 0 { Sign::Positive } else { max_sign };
    }
    Ok(())
}
