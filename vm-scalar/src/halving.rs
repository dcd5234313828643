//! Halving add/sub: (a OP b) >> 1 without intermediate overflow.
//!
//! The sum/difference is split as `(a >> 1) + (b >> 1) + term`, where the term
//! reconstructs the contribution of the two low bits. Truncating halving-add
//! uses AND of the low bits; the rounding variant uses OR. The two are easy to
//! confuse and the tests distinguish them explicitly.

use crate::lane::{SignedLane, UnsignedLane};

#[inline]
fn low_bit_s<S: SignedLane>(v: S::Unsigned) -> S {
    S::from_i128(v.and(<S::Unsigned as UnsignedLane>::ONE).to_u128() as i128)
}

/// Signed halving add, truncating: (a + b) >> 1.
#[inline]
pub fn shadd<S: SignedLane>(a: S, b: S) -> S {
    let term = low_bit_s::<S>(a.as_unsigned().and(b.as_unsigned()));
    a.shr(1).wrapping_add(b.shr(1)).wrapping_add(term)
}

/// Signed halving add, rounding: (a + b + 1) >> 1.
#[inline]
pub fn srhadd<S: SignedLane>(a: S, b: S) -> S {
    let term = low_bit_s::<S>(a.as_unsigned().or(b.as_unsigned()));
    a.shr(1).wrapping_add(b.shr(1)).wrapping_add(term)
}

/// Signed halving subtract, truncating: (a - b) >> 1.
#[inline]
pub fn shsub<S: SignedLane>(a: S, b: S) -> S {
    let borrow = low_bit_s::<S>(a.as_unsigned().not().and(b.as_unsigned()));
    a.shr(1).wrapping_sub(b.shr(1)).wrapping_sub(borrow)
}

/// Unsigned halving add, truncating.
#[inline]
pub fn uhadd<U: UnsignedLane>(a: U, b: U) -> U {
    let term = a.and(b).and(U::ONE);
    a.shr(1).wrapping_add(b.shr(1)).wrapping_add(term)
}

/// Unsigned halving add, rounding.
#[inline]
pub fn urhadd<U: UnsignedLane>(a: U, b: U) -> U {
    let term = a.or(b).and(U::ONE);
    a.shr(1).wrapping_add(b.shr(1)).wrapping_add(term)
}

/// Unsigned halving subtract, truncating.
#[inline]
pub fn uhsub<U: UnsignedLane>(a: U, b: U) -> U {
    let borrow = a.not().and(b).and(U::ONE);
    a.shr(1).wrapping_sub(b.shr(1)).wrapping_sub(borrow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hadd_no_overflow_at_extremes() {
        assert_eq!(uhadd(0xffu8, 0xffu8), 0xff);
        assert_eq!(shadd(i8::MAX, i8::MAX), i8::MAX);
        assert_eq!(shadd(i8::MIN, i8::MIN), i8::MIN);
    }

    #[test]
    fn test_truncating_vs_rounding_differ_on_odd_sum() {
        // 1 + 2 = 3: truncating gives 1, rounding gives 2.
        assert_eq!(uhadd(1u8, 2u8), 1);
        assert_eq!(urhadd(1u8, 2u8), 2);
        assert_eq!(shadd(1i8, 2i8), 1);
        assert_eq!(srhadd(1i8, 2i8), 2);
        // Even sums agree.
        assert_eq!(uhadd(2u8, 2u8), urhadd(2u8, 2u8));
    }

    #[test]
    fn test_shadd_negative_truncates_toward_minus_inf() {
        // (-3 + 0) >> 1 is an arithmetic shift: -2, not -1.
        assert_eq!(shadd(-3i8, 0i8), -2);
        assert_eq!(srhadd(-3i8, 0i8), -1);
    }

    #[test]
    fn test_hsub() {
        assert_eq!(uhsub(10u8, 3u8), 3);
        assert_eq!(shsub(-5i8, 4i8), -5); // (-9) >> 1 arithmetic
        assert_eq!(uhsub(0u8, 1u8), 0xff); // (0 - 1) >> 1 in two's complement
    }

    #[test]
    fn test_hsub_matches_wide_formula() {
        for a in [0u8, 1, 2, 127, 128, 254, 255] {
            for b in [0u8, 1, 3, 100, 255] {
                let wide = ((a as i32 - b as i32) >> 1) as u8;
                assert_eq!(uhsub(a, b), wide, "uhsub({a},{b})");
            }
        }
    }
}
