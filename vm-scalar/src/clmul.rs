//! Carry-less (polynomial over GF(2)) multiply.
//!
//! W x W -> 2W: the product is accumulated in 128 bits so no intermediate
//! shift ever truncates, whatever the lane width.

use crate::lane::UnsignedLane;

/// Carry-less multiply of two W-bit lanes; the 2W-bit product sits in the low
/// bits of the return value.
#[inline]
pub fn clmul<U: UnsignedLane>(a: U, b: U) -> u128 {
    let wide = a.to_u128();
    let mut result = 0u128;
    for bit in 0..U::BITS {
        if b.shr(bit).and(U::ONE) == U::ONE {
            result ^= wide << bit;
        }
    }
    result
}
