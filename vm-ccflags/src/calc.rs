//! The per-kind condition-code rules.

use std::cmp::Ordering;

use log::trace;
use vm_scalar::fp::{FpClass, classify_f32, classify_f64, classify_f128};

use crate::ops::{CcOp, CcWidth};

fn three_way<T: Ord>(a: T, b: T) -> u8 {
    match a.cmp(&b) {
        Ordering::Equal => 0,
        Ordering::Less => 1,
        Ordering::Greater => 2,
    }
}

/// Sign classification shared by the result-bearing kinds: 0 zero, 1
/// negative, 2 positive.
fn sign_code(v: i64) -> u8 {
    match v.cmp(&0) {
        Ordering::Equal => 0,
        Ordering::Less => 1,
        Ordering::Greater => 2,
    }
}

/// Test under mask. Partial matches tie-break on the highest masked bit of
/// the value: set gives 2, clear gives 1.
fn cc_tm(val: u64, mask: u64) -> u8 {
    let r = val & mask;
    if r == 0 || mask == 0 {
        0
    } else if r == mask {
        3
    } else {
        let high = 63 - mask.leading_zeros();
        if (val >> high) & 1 != 0 { 2 } else { 1 }
    }
}

fn cc_add(a1: i64, a2: i64, ar: i64) -> u8 {
    if (a1 > 0 && a2 > 0 && ar < 0) || (a1 < 0 && a2 < 0 && ar > 0) {
        3
    } else {
        sign_code(ar)
    }
}

fn cc_addu(a1: u64, a2: u64, ar: u64) -> u8 {
    if ar == 0 {
        if a1 != 0 { 2 } else { 0 }
    } else if ar < a1 || ar < a2 {
        3
    } else {
        1
    }
}

fn cc_sub(a1: i64, a2: i64, ar: i64) -> u8 {
    if (a1 > 0 && a2 < 0 && ar < 0) || (a1 < 0 && a2 > 0 && ar > 0) {
        3
    } else {
        sign_code(ar)
    }
}

fn cc_subu(a1: u64, a2: u64, ar: u64) -> u8 {
    if ar == 0 {
        2
    } else if a2 > a1 {
        1
    } else {
        3
    }
}

/// 3 only for the width's minimum value, whose magnitude is unrepresentable.
fn cc_abs(dst: i64, min: i64) -> u8 {
    if dst == min {
        3
    } else if dst != 0 {
        1
    } else {
        0
    }
}

fn cc_comp(dst: i64, min: i64) -> u8 {
    if dst == min { 3 } else { sign_code(dst) }
}

/// Insert characters under mask. The full-mask case classifies the whole
/// word; otherwise the leftmost inserted byte's top bit decides 1 vs 2.
fn cc_icm(mask: u32, val: u32) -> u8 {
    let mask = mask & 0xf;
    if mask == 0xf {
        return if val == 0 {
            0
        } else if val & 0x8000_0000 != 0 {
            1
        } else {
            2
        };
    }
    if val == 0 || mask == 0 {
        return 0;
    }
    let high_byte = 31 - mask.leading_zeros();
    if (val >> (8 * high_byte)) & 0x80 != 0 { 1 } else { 2 }
}

/// Arithmetic shift left: 3 if any of the top `shift` bits differs from the
/// sign bit (those bits leave the register), else the sign classification of
/// the result with the original sign bit kept in place.
fn cc_sla64(src: u64, shift: u32) -> u8 {
    let shift = shift & 63;
    let mask = if shift == 0 { 0 } else { ((1u64 << shift) - 1) << (64 - shift) };
    let matched = if src & (1 << 63) != 0 { mask } else { 0 };
    if src & mask != matched {
        return 3;
    }
    let r = ((src << shift) & !(1 << 63)) | (src & (1 << 63));
    sign_code(r as i64)
}

fn cc_sla32(src: u32, shift: u32) -> u8 {
    let shift = shift & 31;
    let mask = if shift == 0 { 0 } else { ((1u32 << shift) - 1) << (32 - shift) };
    let matched = if src & (1 << 31) != 0 { mask } else { 0 };
    if src & mask != matched {
        return 3;
    }
    let r = ((src << shift) & !(1 << 31)) | (src & (1 << 31));
    sign_code(r as i32 as i64)
}

fn cc_muls32(product: i64) -> u8 {
    let top = product >> 31;
    if product == 0 {
        0
    } else if top != 0 && top != -1 {
        3
    } else {
        sign_code(product)
    }
}

fn cc_muls64(high: i64, low: u64) -> u8 {
    if high == 0 && low == 0 {
        0
    } else if high != (low as i64) >> 63 {
        3
    } else if high < 0 {
        1
    } else {
        2
    }
}

/// NaN checks come first: some NaN encodings carry the sign bit.
fn cc_nz_fp(cls: FpClass) -> u8 {
    if cls.is_nan() {
        3
    } else if cls.is_zero() {
        0
    } else if cls.negative {
        1
    } else {
        2
    }
}

/// Vector-compare summary: full match iff every bit of both accumulators is
/// set, no match iff both are zero, else partial.
fn cc_vec_compare(acc0: u64, acc1: u64) -> u8 {
    if acc0 == u64::MAX && acc1 == u64::MAX {
        0
    } else if acc0 == 0 && acc1 == 0 {
        3
    } else {
        1
    }
}

/// Compute the architectural condition code for one recorded operation.
///
/// Total over all inputs: every kind maps any operand combination to a code
/// in 0..=3.
pub fn compute_cc(op: CcOp, src: u64, dst: u64, vr: u64) -> u8 {
    let r = match op {
        CcOp::Const0 => 0,
        CcOp::Const1 => 1,
        CcOp::Const2 => 2,
        CcOp::Const3 => 3,
        CcOp::Nz => (dst != 0) as u8,
        CcOp::Ltgt0(CcWidth::W32) => three_way(dst as u32 as i32, 0),
        CcOp::Ltgt0(CcWidth::W64) => three_way(dst as i64, 0),
        CcOp::Ltgt(CcWidth::W32) => three_way(src as u32 as i32, dst as u32 as i32),
        CcOp::Ltgt(CcWidth::W64) => three_way(src as i64, dst as i64),
        CcOp::Ltugtu(CcWidth::W32) => three_way(src as u32, dst as u32),
        CcOp::Ltugtu(CcWidth::W64) => three_way(src, dst),
        CcOp::Tm(CcWidth::W32) => cc_tm(src as u32 as u64, dst as u32 as u64),
        CcOp::Tm(CcWidth::W64) => cc_tm(src, dst),
        CcOp::Add(CcWidth::W32) => {
            cc_add(src as u32 as i32 as i64, dst as u32 as i32 as i64, vr as u32 as i32 as i64)
        }
        CcOp::Add(CcWidth::W64) => cc_add(src as i64, dst as i64, vr as i64),
        CcOp::Addu(CcWidth::W32) => cc_addu(src as u32 as u64, dst as u32 as u64, vr as u32 as u64),
        CcOp::Addu(CcWidth::W64) => cc_addu(src, dst, vr),
        CcOp::Sub(CcWidth::W32) => {
            cc_sub(src as u32 as i32 as i64, dst as u32 as i32 as i64, vr as u32 as i32 as i64)
        }
        CcOp::Sub(CcWidth::W64) => cc_sub(src as i64, dst as i64, vr as i64),
        CcOp::Subu(CcWidth::W32) => cc_subu(src as u32 as u64, dst as u32 as u64, vr as u32 as u64),
        CcOp::Subu(CcWidth::W64) => cc_subu(src, dst, vr),
        CcOp::Abs(CcWidth::W32) => cc_abs(dst as u32 as i32 as i64, i32::MIN as i64),
        CcOp::Abs(CcWidth::W64) => cc_abs(dst as i64, i64::MIN),
        CcOp::Nabs(CcWidth::W32) => (dst as u32 != 0) as u8,
        CcOp::Nabs(CcWidth::W64) => (dst != 0) as u8,
        CcOp::Comp(CcWidth::W32) => cc_comp(dst as u32 as i32 as i64, i32::MIN as i64),
        CcOp::Comp(CcWidth::W64) => cc_comp(dst as i64, i64::MIN),
        CcOp::Muls(CcWidth::W32) => cc_muls32(dst as i64),
        CcOp::Muls(CcWidth::W64) => cc_muls64(src as i64, dst),
        CcOp::Sla(CcWidth::W32) => cc_sla32(src as u32, dst as u32),
        CcOp::Sla(CcWidth::W64) => cc_sla64(src, dst as u32),
        CcOp::Icm => cc_icm(src as u32, dst as u32),
        CcOp::Flogr => if dst == 0 { 0 } else { 2 },
        CcOp::NzF32 => cc_nz_fp(classify_f32(dst as u32)),
        CcOp::NzF64 => cc_nz_fp(classify_f64(dst)),
        CcOp::NzF128 => cc_nz_fp(classify_f128(((src as u128) << 64) | dst as u128)),
        CcOp::VecCompare => cc_vec_compare(src, dst),
    };
    trace!("cc {op:?} src={src:#x} dst={dst:#x} vr={vr:#x} -> {r}");
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tm_all_masked_bits_set() {
        // value 0b0110, mask 0b0110: every masked bit set.
        assert_eq!(compute_cc(CcOp::Tm(CcWidth::W32), 0b0110, 0b0110, 0), 3);
    }

    #[test]
    fn test_tm_partial_tiebreak_on_highest_masked_bit() {
        // value 0b0010, mask 0b0110: highest masked bit (bit 2) is clear.
        assert_eq!(compute_cc(CcOp::Tm(CcWidth::W32), 0b0010, 0b0110, 0), 1);
        // value 0b0100: highest masked bit set.
        assert_eq!(compute_cc(CcOp::Tm(CcWidth::W32), 0b0100, 0b0110, 0), 2);
        // Same rule at 64-bit width.
        let mask = 0x6000_0000_0000_0000u64;
        assert_eq!(compute_cc(CcOp::Tm(CcWidth::W64), 0x2000_0000_0000_0000, mask, 0), 1);
        assert_eq!(compute_cc(CcOp::Tm(CcWidth::W64), 0x4000_0000_0000_0000, mask, 0), 2);
    }

    #[test]
    fn test_tm_zero_cases() {
        assert_eq!(compute_cc(CcOp::Tm(CcWidth::W64), 0xff, 0, 0), 0);
        assert_eq!(compute_cc(CcOp::Tm(CcWidth::W64), 0, 0xff, 0), 0);
    }

    #[test]
    fn test_signed_compare_is_three_way() {
        assert_eq!(compute_cc(CcOp::Ltgt(CcWidth::W32), 5, 5, 0), 0);
        assert_eq!(compute_cc(CcOp::Ltgt(CcWidth::W32), 0xffff_ffff, 1, 0), 1); // -1 < 1
        assert_eq!(compute_cc(CcOp::Ltugtu(CcWidth::W32), 0xffff_ffff, 1, 0), 2);
    }

    #[test]
    fn test_add_overflow_beats_result_sign() {
        let a = i32::MAX as u64;
        let r = (i32::MAX).wrapping_add(1) as u32 as u64;
        assert_eq!(compute_cc(CcOp::Add(CcWidth::W32), a, 1, r), 3);
        assert_eq!(compute_cc(CcOp::Add(CcWidth::W32), 1, 2, 3), 2);
        assert_eq!(compute_cc(CcOp::Add(CcWidth::W64), 0, 0, 0), 0);
    }

    #[test]
    fn test_addu_carry_and_zero_classes() {
        // zero result, no operand: 0.
        assert_eq!(compute_cc(CcOp::Addu(CcWidth::W64), 0, 0, 0), 0);
        // zero result from carry wrap: 2.
        assert_eq!(compute_cc(CcOp::Addu(CcWidth::W64), u64::MAX, 1, 0), 2);
        // nonzero without carry: 1.
        assert_eq!(compute_cc(CcOp::Addu(CcWidth::W64), 1, 2, 3), 1);
        // nonzero with carry: 3.
        assert_eq!(compute_cc(CcOp::Addu(CcWidth::W64), u64::MAX, 2, 1), 3);
    }

    #[test]
    fn test_subu_borrow_classes() {
        assert_eq!(compute_cc(CcOp::Subu(CcWidth::W64), 5, 5, 0), 2);
        assert_eq!(compute_cc(CcOp::Subu(CcWidth::W64), 3, 5, 3u64.wrapping_sub(5)), 1);
        assert_eq!(compute_cc(CcOp::Subu(CcWidth::W64), 5, 3, 2), 3);
    }

    #[test]
    fn test_abs_flags_only_minimum_value() {
        assert_eq!(compute_cc(CcOp::Abs(CcWidth::W32), 0, i32::MIN as u32 as u64, 0), 3);
        assert_eq!(compute_cc(CcOp::Abs(CcWidth::W32), 0, 7, 0), 1);
        assert_eq!(compute_cc(CcOp::Abs(CcWidth::W32), 0, 0, 0), 0);
        assert_eq!(compute_cc(CcOp::Abs(CcWidth::W64), 0, i64::MIN as u64, 0), 3);
    }

    #[test]
    fn test_comp_classification() {
        assert_eq!(compute_cc(CcOp::Comp(CcWidth::W64), 0, i64::MIN as u64, 0), 3);
        assert_eq!(compute_cc(CcOp::Comp(CcWidth::W64), 0, (-4i64) as u64, 0), 1);
        assert_eq!(compute_cc(CcOp::Comp(CcWidth::W64), 0, 4, 0), 2);
        assert_eq!(compute_cc(CcOp::Comp(CcWidth::W64), 0, 0, 0), 0);
    }

    #[test]
    fn test_icm_full_and_partial_masks() {
        assert_eq!(compute_cc(CcOp::Icm, 0xf, 0, 0), 0);
        assert_eq!(compute_cc(CcOp::Icm, 0xf, 0x8000_0000, 0), 1);
        assert_eq!(compute_cc(CcOp::Icm, 0xf, 0x7fff_ffff, 0), 2);
        // Mask 0b0100 selects byte 2; its top bit decides.
        assert_eq!(compute_cc(CcOp::Icm, 0b0100, 0x0080_0000, 0), 1);
        assert_eq!(compute_cc(CcOp::Icm, 0b0100, 0x0040_0000, 0), 2);
        assert_eq!(compute_cc(CcOp::Icm, 0, 0x1234, 0), 0);
    }

    #[test]
    fn test_sla_overflow_and_sign_keep() {
        // Only the top `shift` bits are inspected: bit 62 leaves the register
        // for shift 2 (overflow), but for shift 1 it moves into the sign
        // position, which is not inspected; the sign-preserved result is 0.
        assert_eq!(compute_cc(CcOp::Sla(CcWidth::W64), 1 << 62, 2, 0), 3);
        assert_eq!(compute_cc(CcOp::Sla(CcWidth::W64), 1 << 62, 1, 0), 0);
        // Negative value losing a 0 from the top bits overflows too.
        assert_eq!(compute_cc(CcOp::Sla(CcWidth::W64), i64::MIN as u64, 2, 0), 3);
        // Negative value whose shifted-out bits are all ones stays fine.
        assert_eq!(compute_cc(CcOp::Sla(CcWidth::W64), (-1i64) as u64, 3, 0), 1);
        assert_eq!(compute_cc(CcOp::Sla(CcWidth::W64), 1, 2, 0), 2);
        assert_eq!(compute_cc(CcOp::Sla(CcWidth::W64), 0, 5, 0), 0);
        assert_eq!(compute_cc(CcOp::Sla(CcWidth::W32), 1 << 30, 2, 0), 3);
        assert_eq!(compute_cc(CcOp::Sla(CcWidth::W32), 1 << 30, 1, 0), 0);
        assert_eq!(compute_cc(CcOp::Sla(CcWidth::W32), 1, 4, 0), 2);
    }

    #[test]
    fn test_flogr_never_returns_one_or_three() {
        assert_eq!(compute_cc(CcOp::Flogr, 0, 0, 0), 0);
        assert_eq!(compute_cc(CcOp::Flogr, 0, 0x40, 0), 2);
        assert_eq!(compute_cc(CcOp::Flogr, 0, u64::MAX, 0), 2);
    }

    #[test]
    fn test_muls_overflow_detection() {
        // 0x10000 * 0x10000 does not fit 32 bits.
        let p = (0x10000i64) * (0x10000i64);
        assert_eq!(compute_cc(CcOp::Muls(CcWidth::W32), 0, p as u64, 0), 3);
        assert_eq!(compute_cc(CcOp::Muls(CcWidth::W32), 0, (-6i64) as u64, 0), 1);
        assert_eq!(compute_cc(CcOp::Muls(CcWidth::W32), 0, 6, 0), 2);
        assert_eq!(compute_cc(CcOp::Muls(CcWidth::W32), 0, 0, 0), 0);
        // 64-bit: high half must be the sign extension of the low half.
        assert_eq!(compute_cc(CcOp::Muls(CcWidth::W64), 1, 0, 0), 3);
        assert_eq!(compute_cc(CcOp::Muls(CcWidth::W64), 0, 9, 0), 2);
        assert_eq!(compute_cc(CcOp::Muls(CcWidth::W64), u64::MAX, (-9i64) as u64, 0), 1);
    }

    #[test]
    fn test_fp_nan_checked_before_sign() {
        // NaN with the sign bit set must still classify as 3, not 1.
        let neg_nan = 0xfff8_0000_0000_0000u64;
        assert_eq!(compute_cc(CcOp::NzF64, 0, neg_nan, 0), 3);
        assert_eq!(compute_cc(CcOp::NzF64, 0, (-0.0f64).to_bits(), 0), 0);
        assert_eq!(compute_cc(CcOp::NzF64, 0, (-2.5f64).to_bits(), 0), 1);
        assert_eq!(compute_cc(CcOp::NzF64, 0, (2.5f64).to_bits(), 0), 2);
        assert_eq!(compute_cc(CcOp::NzF32, 0, (1.0f32).to_bits() as u64, 0), 2);
    }

    #[test]
    fn test_fp128_classification_uses_both_halves() {
        // +0 is all-zero across both halves.
        assert_eq!(compute_cc(CcOp::NzF128, 0, 0, 0), 0);
        // All-zero magnitude with the sign bit set is still zero.
        assert_eq!(compute_cc(CcOp::NzF128, 0x8000_0000_0000_0000, 0, 0), 0);
        // A negative normal classifies by sign.
        assert_eq!(compute_cc(CcOp::NzF128, 0xc000_0000_0000_0000, 0, 0), 1);
        // Quiet NaN.
        assert_eq!(compute_cc(CcOp::NzF128, 0x7fff_8000_0000_0000, 0, 0), 3);
        // Nonzero low half alone makes a subnormal, positive.
        assert_eq!(compute_cc(CcOp::NzF128, 0, 1, 0), 2);
    }

    #[test]
    fn test_vector_compare_summary() {
        assert_eq!(compute_cc(CcOp::VecCompare, u64::MAX, u64::MAX, 0), 0);
        assert_eq!(compute_cc(CcOp::VecCompare, 0, 0, 0), 3);
        assert_eq!(compute_cc(CcOp::VecCompare, u64::MAX, 0, 0), 1);
        assert_eq!(compute_cc(CcOp::VecCompare, 0x00ff, 0, 0), 1);
    }
}
