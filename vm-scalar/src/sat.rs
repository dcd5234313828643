//! Saturating add/sub primitives
//!
//! Each primitive computes the exact result in a wider type, clamps it to the
//! lane's representable range, and reports saturation by OR-ing the XOR of the
//! wrapped and clamped results into the caller's [`Sticky`] accumulator. The
//! XOR is the signal: it is nonzero exactly when clamping changed the value,
//! and OR-ing it per lane composes across an entire vector instruction.

use crate::flags::Sticky;
use crate::lane::{SignedLane, UnsignedLane};

/// Unsigned saturating add: clamp(a + b, 0, 2^W - 1).
#[inline]
pub fn uqadd<U: UnsignedLane>(a: U, b: U, qc: &mut Sticky) -> U {
    let wrapped = a.wrapping_add(b);
    let exact = a.to_u128() + b.to_u128();
    let clamped = if exact > U::MAX.to_u128() {
        U::MAX
    } else {
        U::from_u128(exact)
    };
    qc.or(wrapped.xor(clamped).to_u64());
    clamped
}

/// Unsigned saturating subtract: clamp(a - b, 0, 2^W - 1).
#[inline]
pub fn uqsub<U: UnsignedLane>(a: U, b: U, qc: &mut Sticky) -> U {
    let wrapped = a.wrapping_sub(b);
    let clamped = if a < b { U::ZERO } else { wrapped };
    qc.or(wrapped.xor(clamped).to_u64());
    clamped
}

/// Signed saturating add: clamp(a + b, -2^(W-1), 2^(W-1) - 1).
#[inline]
pub fn sqadd<S: SignedLane>(a: S, b: S, qc: &mut Sticky) -> S {
    let wrapped = a.wrapping_add(b);
    let exact = a.to_i128() + b.to_i128();
    let clamped = S::from_i128(exact.clamp(S::MIN.to_i128(), S::MAX.to_i128()));
    qc.or(wrapped.as_unsigned().xor(clamped.as_unsigned()).to_u64());
    clamped
}

/// Signed saturating subtract: clamp(a - b, -2^(W-1), 2^(W-1) - 1).
#[inline]
pub fn sqsub<S: SignedLane>(a: S, b: S, qc: &mut Sticky) -> S {
    let wrapped = a.wrapping_sub(b);
    let exact = a.to_i128() - b.to_i128();
    let clamped = S::from_i128(exact.clamp(S::MIN.to_i128(), S::MAX.to_i128()));
    qc.or(wrapped.as_unsigned().xor(clamped.as_unsigned()).to_u64());
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqadd_positive_saturation() {
        // Concrete scenario: 0x7fffffff + 1 saturates to 0x7fffffff.
        let mut qc = Sticky::new();
        let r = sqadd(0x7fff_ffffi32, 1, &mut qc);
        assert_eq!(r, 0x7fff_ffff);
        assert!(qc.is_set());
    }

    #[test]
    fn test_sqadd_negative_saturation() {
        let mut qc = Sticky::new();
        let r = sqadd(i8::MIN, -1i8, &mut qc);
        assert_eq!(r, i8::MIN);
        assert!(qc.is_set());
    }

    #[test]
    fn test_sqadd_no_saturation_leaves_qc_alone() {
        let mut qc = Sticky::new();
        let r = sqadd(100i16, -50i16, &mut qc);
        assert_eq!(r, 50);
        assert!(!qc.is_set());
    }

    #[test]
    fn test_sqsub_boundary() {
        let mut qc = Sticky::new();
        // MIN - 1 underflows to MIN.
        assert_eq!(sqsub(i64::MIN, 1i64, &mut qc), i64::MIN);
        assert!(qc.is_set());
    }

    #[test]
    fn test_uqadd_saturates_to_max() {
        let mut qc = Sticky::new();
        assert_eq!(uqadd(0xffu8, 0x01u8, &mut qc), 0xff);
        assert!(qc.is_set());
    }

    #[test]
    fn test_uqsub_clamps_to_zero() {
        let mut qc = Sticky::new();
        assert_eq!(uqsub(0u8, 1u8, &mut qc), 0);
        assert!(qc.is_set());

        let mut qc = Sticky::new();
        assert_eq!(uqsub(255u8, 0u8, &mut qc), 255);
        assert_eq!(uqsub(10u8, 10u8, &mut qc), 0);
        assert!(!qc.is_set());
    }

    #[test]
    fn test_qc_is_sticky_across_calls() {
        let mut qc = Sticky::new();
        uqsub(0u8, 1u8, &mut qc);
        // A later non-saturating lane must not clear the flag.
        uqsub(5u8, 1u8, &mut qc);
        assert!(qc.is_set());
    }
}
