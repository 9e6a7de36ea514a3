//! Portable limb-level arithmetic primitives.

/// Add with carry: a + b + carry -> (sum, `new_carry`)
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn add_with_carry(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let sum = u128::from(a) + u128::from(b) + u128::from(carry);
    (sum as u64, (sum >> 64) as u64)
}

/// Subtract with borrow: a - b - borrow -> (diff, `new_borrow`)
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sub_with_borrow(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let diff = i128::from(a) - i128::from(b) - i128::from(borrow);
    if diff < 0 {
        ((diff + (1i128 << 64)) as u64, 1)
    } else {
        (diff as u64, 0)
    }
}

/// Multiply: a * b -> (low, high)
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn mul_wide(a: u64, b: u64) -> (u64, u64) {
    let prod = u128::from(a) * u128::from(b);
    (prod as u64, (prod >> 64) as u64)
}

/// Add `src` into the low limbs of `dst` in place, returning the carry out
/// of `dst[src.len() - 1]`. Requires `dst.len() >= src.len()`; limbs of
/// `dst` beyond `src.len()` are not touched.
pub fn add_into(dst: &mut [u64], src: &[u64]) -> u64 {
    debug_assert!(dst.len() >= src.len());
    let mut carry = 0;
    for (d, &s) in dst.iter_mut().zip(src) {
        let (sum, c) = add_with_carry(*d, s, carry);
        *d = sum;
        carry = c;
    }
    carry
}

/// Subtract `src` from the low limbs of `dst` in place, returning the
/// borrow out of `dst[src.len() - 1]`. Requires `dst.len() >= src.len()`.
pub fn sub_into(dst: &mut [u64], src: &[u64]) -> u64 {
    debug_assert!(dst.len() >= src.len());
    let mut borrow = 0;
    for (d, &s) in dst.iter_mut().zip(src) {
        let (diff, b) = sub_with_borrow(*d, s, borrow);
        *d = diff;
        borrow = b;
    }
    borrow
}

/// Add a scalar into a limb slice, returning the final carry.
pub fn add_scalar(data: &mut [u64], scalar: u64) -> u64 {
    let mut carry = scalar;
    for limb in data.iter_mut() {
        let (sum, c) = add_with_carry(*limb, carry, 0);
        *limb = sum;
        carry = c;
        if carry == 0 {
            break;
        }
    }
    carry
}

/// Subtract a scalar from a limb slice, returning the final borrow.
pub fn sub_scalar(data: &mut [u64], scalar: u64) -> u64 {
    let mut borrow = scalar;
    for limb in data.iter_mut() {
        let (diff, b) = sub_with_borrow(*limb, borrow, 0);
        *limb = diff;
        borrow = b;
        if borrow == 0 {
            break;
        }
    }
    borrow
}

/// Length of `limbs` with leading-zero limbs stripped.
#[inline]
#[must_use]
pub fn trimmed_len(limbs: &[u64]) -> usize {
    let mut len = limbs.len();
    while len > 0 && limbs[len - 1] == 0 {
        len -= 1;
    }
    len
}

/// `limbs` with leading-zero limbs stripped.
#[inline]
#[must_use]
pub fn trim(limbs: &[u64]) -> &[u64] {
    &limbs[..trimmed_len(limbs)]
}
