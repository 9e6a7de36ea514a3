//! School-book and Karatsuba multiplication.
//!
//! Short operands take the row-wise school-book kernel; once the shorter
//! operand reaches [`KARATSUBA_THRESHOLD`] limbs the product is split into
//! three half-size products and recombined with shifted additions. Scratch
//! buffers for the split come from the destination's allocator, so scratch
//! exhaustion surfaces as `OutOfMemory` like any other allocation failure.
//! The split path stages its result in scratch and commits to the
//! destination only once the whole product has succeeded, so a failed
//! multiply leaves the destination unchanged.

use tracing::trace;

use apint_memory::{AllocError, LimbAllocator};

use crate::apint::{ApInt, Sign};
use crate::constants::KARATSUBA_THRESHOLD;
use crate::error::{ApIntError, Result};
use crate::limbs::{add_into, add_scalar, sub_into, trim, trimmed_len};
use crate::op_limit::mul_limit_limbs;

/// `dst = a * b` with sign-magnitude semantics.
pub fn mul(dst: &mut ApInt, a: &ApInt, b: &ApInt) -> Result<()> {
    if dst.capacity() == 0 || !a.is_initialized() || !b.is_initialized() {
        return Err(ApIntError::Uninitialized);
    }
    mul_magnitudes(dst, a.magnitude(), a.sign(), b.magnitude(), b.sign())
}

/// `dst = a * value` for an unsigned scalar.
pub fn mul_u64(dst: &mut ApInt, a: &ApInt, value: u64) -> Result<()> {
    if dst.capacity() == 0 || !a.is_initialized() {
        return Err(ApIntError::Uninitialized);
    }
    let limb = [value];
    let mag = &limb[..usize::from(value != 0)];
    mul_magnitudes(dst, a.magnitude(), a.sign(), mag, Sign::Positive)
}

/// `dst = a * value` for a signed scalar.
pub fn mul_i64(dst: &mut ApInt, a: &ApInt, value: i64) -> Result<()> {
    if dst.capacity() == 0 || !a.is_initialized() {
        return Err(ApIntError::Uninitialized);
    }
    let limb = [value.unsigned_abs()];
    let mag = &limb[..usize::from(value != 0)];
    let sign = if value < 0 {
        Sign::Negative
    } else {
        Sign::Positive
    };
    mul_magnitudes(dst, a.magnitude(), a.sign(), mag, sign)
}

fn mul_magnitudes(
    dst: &mut ApInt,
    a_mag: &[u64],
    a_sign: Sign,
    b_mag: &[u64],
    b_sign: Sign,
) -> Result<()> {
    if a_mag.is_empty() || b_mag.is_empty() {
        dst.len = 0;
        dst.sign = Sign::Positive;
        return Ok(());
    }

    let out_len = mul_limit_limbs(a_mag, b_mag);
    dst.ensure_capacity(out_len)?;

    if a_mag.len().min(b_mag.len()) < KARATSUBA_THRESHOLD {
        // The school-book kernel allocates nothing, so it may write the
        // destination directly.
        dst.limbs[..out_len].fill(0);
        schoolbook(&mut dst.limbs[..out_len], a_mag, b_mag);
    } else {
        // The split path can fail mid-product on a scratch allocation;
        // stage the result and commit only on success.
        let mut out = Scratch::new(&dst.alloc, out_len)?;
        mul_limbs(&mut out.buf, a_mag, b_mag, &dst.alloc)?;
        dst.limbs[..out_len].copy_from_slice(&out.buf[..out_len]);
    }

    dst.len = trimmed_len(&dst.limbs[..out_len]);
    dst.sign = if a_sign == b_sign {
        Sign::Positive
    } else {
        Sign::Negative
    };
    Ok(())
}

/// Multiply two magnitudes into `dst`, which must be zeroed and hold at
/// least `a.len() + b.len()` limbs and must not alias either input.
pub(crate) fn mul_limbs(
    dst: &mut [u64],
    a: &[u64],
    b: &[u64],
    alloc: &dyn LimbAllocator,
) -> std::result::Result<(), AllocError> {
    let a = trim(a);
    let b = trim(b);
    if a.is_empty() || b.is_empty() {
        return Ok(());
    }
    debug_assert!(dst.len() >= a.len() + b.len());

    if a.len().min(b.len()) < KARATSUBA_THRESHOLD {
        schoolbook(dst, a, b);
        Ok(())
    } else {
        karatsuba(dst, a, b, alloc)
    }
}

/// Row-wise school-book kernel. `dst` must be zeroed; writes exactly
/// `a.len() + b.len()` limbs.
#[allow(clippy::cast_possible_truncation)]
fn schoolbook(dst: &mut [u64], a: &[u64], b: &[u64]) {
    for (i, &ai) in a.iter().enumerate() {
        let mut carry = 0u64;
        for (j, &bj) in b.iter().enumerate() {
            let t = u128::from(ai) * u128::from(bj)
                + u128::from(dst[i + j])
                + u128::from(carry);
            dst[i + j] = t as u64;
            carry = (t >> 64) as u64;
        }
        // The carry column of row i has not been written yet.
        dst[i + b.len()] = carry;
    }
}

/// Scratch buffer returned to its allocator when dropped, on success and
/// error paths alike.
struct Scratch<'a> {
    buf: Vec<u64>,
    alloc: &'a dyn LimbAllocator,
}

impl<'a> Scratch<'a> {
    fn new(alloc: &'a dyn LimbAllocator, limbs: usize) -> std::result::Result<Self, AllocError> {
        Ok(Self {
            buf: alloc.allocate(limbs)?,
            alloc,
        })
    }
}

impl Drop for Scratch<'_> {
    fn drop(&mut self) {
        self.alloc.release(std::mem::take(&mut self.buf));
    }
}

/// Karatsuba split: `a * b = z2 << 2m + (z1 - z0 - z2) << m + z0` with
/// `z0 = a0*b0`, `z2 = a1*b1`, `z1 = (a0+a1)*(b0+b1)`.
fn karatsuba(
    dst: &mut [u64],
    a: &[u64],
    b: &[u64],
    alloc: &dyn LimbAllocator,
) -> std::result::Result<(), AllocError> {
    let m = a.len().min(b.len()) / 2;
    trace!(a_len = a.len(), b_len = b.len(), split = m, "karatsuba split");

    let (a0, a1) = a.split_at(m);
    let (b0, b1) = b.split_at(m);

    // z0 and z2 land directly in disjoint regions of dst.
    let out_len = a.len() + b.len();
    let (lo, hi) = dst[..out_len].split_at_mut(2 * m);
    mul_limbs(lo, a0, b0, alloc)?;
    mul_limbs(hi, a1, b1, alloc)?;

    // Half sums a0 + a1 and b0 + b1. The high halves are at least as long
    // as the low halves, so accumulate into a copy of the high half.
    let sa = half_sum(a1, a0, alloc)?;
    let sb = half_sum(b1, b0, alloc)?;
    let sa_mag = trim(&sa.buf);
    let sb_mag = trim(&sb.buf);

    let mut z1 = Scratch::new(alloc, sa_mag.len() + sb_mag.len())?;
    mul_limbs(&mut z1.buf, sa_mag, sb_mag, alloc)?;

    // z1 -= z0; z1 -= z2. Both stay non-negative.
    let borrow = sub_into(&mut z1.buf, trim(&dst[..2 * m]));
    debug_assert_eq!(borrow, 0);
    let borrow = sub_into(&mut z1.buf, trim(&dst[2 * m..out_len]));
    debug_assert_eq!(borrow, 0);

    // dst += z1 << m.
    let z1_mag = trim(&z1.buf);
    let carry = add_into(&mut dst[m..m + z1_mag.len()], z1_mag);
    let carry = add_scalar(&mut dst[m + z1_mag.len()..out_len], carry);
    debug_assert_eq!(carry, 0);
    Ok(())
}

/// `long + short` into fresh scratch one limb longer than `long`.
fn half_sum<'a>(
    long: &[u64],
    short: &[u64],
    alloc: &'a dyn LimbAllocator,
) -> std::result::Result<Scratch<'a>, AllocError> {
    debug_assert!(long.len() >= short.len());
    let mut sum = Scratch::new(alloc, long.len() + 1)?;
    sum.buf[..long.len()].copy_from_slice(long);
    let carry = add_into(&mut sum.buf[..long.len()], short);
    let carry = add_scalar(&mut sum.buf[long.len()..], carry);
    debug_assert_eq!(carry, 0);
    Ok(sum)
}
