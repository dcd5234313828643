//! Lane-width abstraction for the scalar primitives
//!
//! The original helpers exist once per width; here each primitive is written
//! once against these traits and instantiated per width. The traits are sealed:
//! lanes are exactly the 8/16/32/64-bit integer pairs, nothing else.

use std::fmt;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for i8 {}
    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
}

/// An unsigned lane value (the raw bit pattern of one vector element).
pub trait UnsignedLane:
    sealed::Sealed + Copy + Eq + Ord + fmt::Debug + Send + Sync + 'static
{
    /// The same width reinterpreted as two's-complement.
    type Signed: SignedLane<Unsigned = Self>;

    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;

    fn from_u128(v: u128) -> Self;
    fn to_u128(self) -> u128;
    fn to_u64(self) -> u64;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;

    /// Logical shift left; `n` must be < `BITS`.
    fn shl(self, n: u32) -> Self;
    /// Logical shift right; `n` must be < `BITS`.
    fn shr(self, n: u32) -> Self;

    fn and(self, rhs: Self) -> Self;
    fn or(self, rhs: Self) -> Self;
    fn xor(self, rhs: Self) -> Self;
    fn not(self) -> Self;

    fn as_signed(self) -> Self::Signed;
}

/// A signed lane value.
pub trait SignedLane:
    sealed::Sealed + Copy + Eq + Ord + fmt::Debug + Send + Sync + 'static
{
    type Unsigned: UnsignedLane<Signed = Self>;

    const BITS: u32;
    const ZERO: Self;
    const MIN: Self;
    const MAX: Self;

    /// Truncating (wrapping) narrow from a wide exact value.
    fn from_i128(v: i128) -> Self;
    /// Sign-extending widen.
    fn to_i128(self) -> i128;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;

    fn shl(self, n: u32) -> Self;
    /// Arithmetic shift right; `n` must be < `BITS`.
    fn shr(self, n: u32) -> Self;

    fn as_unsigned(self) -> Self::Unsigned;
}

macro_rules! impl_lane_pair {
    ($u:ty, $s:ty) => {
        impl UnsignedLane for $u {
            type Signed = $s;

            const BITS: u32 = <$u>::BITS;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$u>::MAX;

            #[inline]
            fn from_u128(v: u128) -> Self {
                v as $u
            }
            #[inline]
            fn to_u128(self) -> u128 {
                self as u128
            }
            #[inline]
            fn to_u64(self) -> u64 {
                self as u64
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$u>::wrapping_add(self, rhs)
            }
            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$u>::wrapping_sub(self, rhs)
            }
            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$u>::wrapping_mul(self, rhs)
            }

            #[inline]
            fn shl(self, n: u32) -> Self {
                self << n
            }
            #[inline]
            fn shr(self, n: u32) -> Self {
                self >> n
            }

            #[inline]
            fn and(self, rhs: Self) -> Self {
                self & rhs
            }
            #[inline]
            fn or(self, rhs: Self) -> Self {
                self | rhs
            }
            #[inline]
            fn xor(self, rhs: Self) -> Self {
                self ^ rhs
            }
            #[inline]
            fn not(self) -> Self {
                !self
            }

            #[inline]
            fn as_signed(self) -> $s {
                self as $s
            }
        }

        impl SignedLane for $s {
            type Unsigned = $u;

            const BITS: u32 = <$s>::BITS;
            const ZERO: Self = 0;
            const MIN: Self = <$s>::MIN;
            const MAX: Self = <$s>::MAX;

            #[inline]
            fn from_i128(v: i128) -> Self {
                v as $s
            }
            #[inline]
            fn to_i128(self) -> i128 {
                self as i128
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$s>::wrapping_add(self, rhs)
            }
            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$s>::wrapping_sub(self, rhs)
            }

            #[inline]
            fn shl(self, n: u32) -> Self {
                self << n
            }
            #[inline]
            fn shr(self, n: u32) -> Self {
                self >> n
            }

            #[inline]
            fn as_unsigned(self) -> $u {
                self as $u
            }
        }
    };
}

impl_lane_pair!(u8, i8);
impl_lane_pair!(u16, i16);
impl_lane_pair!(u32, i32);
impl_lane_pair!(u64, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen_narrow_roundtrip() {
        assert_eq!(<i8 as SignedLane>::from_i128((-1i8).to_i128()), -1i8);
        assert_eq!(<u16 as UnsignedLane>::from_u128(0xffff), 0xffffu16);
        assert_eq!(0x8000_0000u32.as_signed(), i32::MIN);
        assert_eq!(i64::MIN.as_unsigned(), 0x8000_0000_0000_0000u64);
    }

    #[test]
    fn test_truncating_narrow_wraps() {
        assert_eq!(<i8 as SignedLane>::from_i128(200), -56i8);
        assert_eq!(<u8 as UnsignedLane>::from_u128(0x1_05), 5u8);
    }
}
