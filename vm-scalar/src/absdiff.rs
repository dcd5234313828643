//! Absolute difference and accumulating absolute difference.
//!
//! The tie-break is a strict less-than: when a == b the subtraction runs as
//! a - b. The result is 0 either way, but the accumulating variant is built on
//! the same selection and the two must stay consistent.

use crate::lane::{SignedLane, UnsignedLane};

/// Signed absolute difference: max(a, b) - min(a, b), wrapping in-width.
/// sabd(MIN, MAX) wraps to 0xff.. - that is the architected result.
#[inline]
pub fn sabd<S: SignedLane>(a: S, b: S) -> S {
    if a < b { b.wrapping_sub(a) } else { a.wrapping_sub(b) }
}

/// Unsigned absolute difference.
#[inline]
pub fn uabd<U: UnsignedLane>(a: U, b: U) -> U {
    if a < b { b.wrapping_sub(a) } else { a.wrapping_sub(b) }
}

/// Signed absolute difference, accumulated into the destination's prior value.
#[inline]
pub fn saba<S: SignedLane>(d: S, a: S, b: S) -> S {
    d.wrapping_add(sabd(a, b))
}

/// Unsigned absolute difference, accumulated.
#[inline]
pub fn uaba<U: UnsignedLane>(d: U, a: U, b: U) -> U {
    d.wrapping_add(uabd(a, b))
}
