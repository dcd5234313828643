//! Shift primitives: immediate rounding shifts, their accumulating variants,
//! and per-lane variable shifts with defined out-of-range behavior.
//!
//! Immediate shift amounts come from the instruction encoding and are in
//! `1..=W`; anything else is a decoder bug and asserts. Variable shift amounts
//! come from a guest register and may be any value; out-of-range amounts get
//! the architected result, never a host shift by >= W.

use crate::lane::{SignedLane, UnsignedLane};

/// Rounded arithmetic shift right: (x >> sh) + bit(sh - 1), for 1 <= sh <= W.
///
/// At sh == W the result is exactly 0 for every input: both (-1 + 1) >> 1 and
/// (0 + 1) >> 1 collapse to 0. The single widened formula below subsumes that
/// boundary, which the property tests pin down.
#[inline]
pub fn srshr<S: SignedLane>(x: S, sh: u32) -> S {
    assert!(sh >= 1 && sh <= S::BITS, "rounding shift amount {sh} out of range");
    let wide = x.to_i128();
    S::from_i128(((wide >> (sh - 1)) + 1) >> 1)
}

/// Rounded logical shift right. At sh == W the result is the input's top bit.
#[inline]
pub fn urshr<U: UnsignedLane>(x: U, sh: u32) -> U {
    assert!(sh >= 1 && sh <= U::BITS, "rounding shift amount {sh} out of range");
    let wide = x.to_u128();
    U::from_u128(((wide >> (sh - 1)) + 1) >> 1)
}

/// Plain arithmetic shift right by an immediate in 1..=W. A shift by W is
/// architecturally valid and yields all sign bits.
#[inline]
pub fn sshr_imm<S: SignedLane>(x: S, sh: u32) -> S {
    assert!(sh >= 1 && sh <= S::BITS, "shift amount {sh} out of range");
    x.shr(sh.min(S::BITS - 1))
}

/// Plain logical shift right by an immediate in 1..=W. A shift by W yields 0.
#[inline]
pub fn ushr_imm<U: UnsignedLane>(x: U, sh: u32) -> U {
    assert!(sh >= 1 && sh <= U::BITS, "shift amount {sh} out of range");
    if sh == U::BITS { U::ZERO } else { x.shr(sh) }
}

/// Shift right and accumulate. The destination's prior value is an input:
/// accumulation happens after the shift.
#[inline]
pub fn ssra<S: SignedLane>(d: S, x: S, sh: u32) -> S {
    d.wrapping_add(sshr_imm(x, sh))
}

/// Unsigned shift right and accumulate.
#[inline]
pub fn usra<U: UnsignedLane>(d: U, x: U, sh: u32) -> U {
    d.wrapping_add(ushr_imm(x, sh))
}

/// Rounded shift right and accumulate (shift, then round, then accumulate).
#[inline]
pub fn srsra<S: SignedLane>(d: S, x: S, sh: u32) -> S {
    d.wrapping_add(srshr(x, sh))
}

/// Unsigned rounded shift right and accumulate.
#[inline]
pub fn ursra<U: UnsignedLane>(d: U, x: U, sh: u32) -> U {
    d.wrapping_add(urshr(x, sh))
}

/// Variable shift, unsigned. The shift amount is the signed low byte of the
/// shift operand: non-negative shifts left, negative shifts right. Amounts
/// whose magnitude reaches the lane width produce 0 in both directions.
#[inline]
pub fn ushl<U: UnsignedLane>(x: U, shift: i8) -> U {
    if shift >= 0 {
        let n = shift as u32;
        if n < U::BITS { x.shl(n) } else { U::ZERO }
    } else {
        // -(i8::MIN) does not fit in i8; widen before negating.
        let n = (-(shift as i32)) as u32;
        if n < U::BITS { x.shr(n) } else { U::ZERO }
    }
}

/// Variable shift, signed. Out-of-range right shifts fill with the sign bit
/// (the amount saturates to W - 1); out-of-range left shifts produce 0.
#[inline]
pub fn sshl<S: SignedLane>(x: S, shift: i8) -> S {
    if shift >= 0 {
        let n = shift as u32;
        if n < S::BITS { x.shl(n) } else { S::ZERO }
    } else {
        let n = (-(shift as i32)) as u32;
        x.shr(n.min(S::BITS - 1))
    }
}
