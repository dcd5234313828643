//! Data-class inspection on raw IEEE-754 encodings.
//!
//! Classification works on bits, not host floats: the host would quiet a
//! signaling NaN the moment it touched one, and the condition-code rules need
//! the sign of NaNs and zeros preserved exactly.

/// The value's class, sign excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpKind {
    Zero,
    Subnormal,
    Normal,
    Infinite,
    QuietNan,
    SignalingNan,
}

/// Full classification: class plus sign bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FpClass {
    pub kind: FpKind,
    pub negative: bool,
}

impl FpClass {
    #[inline]
    pub fn is_nan(self) -> bool {
        matches!(self.kind, FpKind::QuietNan | FpKind::SignalingNan)
    }

    #[inline]
    pub fn is_signaling(self) -> bool {
        self.kind == FpKind::SignalingNan
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.kind == FpKind::Zero
    }
}

fn classify(sign: bool, exp_all_ones: bool, exp_zero: bool, frac: u128, quiet_bit: u128) -> FpClass {
    let kind = if exp_all_ones {
        if frac == 0 {
            FpKind::Infinite
        } else if frac & quiet_bit != 0 {
            FpKind::QuietNan
        } else {
            FpKind::SignalingNan
        }
    } else if exp_zero {
        if frac == 0 { FpKind::Zero } else { FpKind::Subnormal }
    } else {
        FpKind::Normal
    };
    FpClass { kind, negative: sign }
}

/// Classify a binary32 encoding.
pub fn classify_f32(bits: u32) -> FpClass {
    let exp = (bits >> 23) & 0xff;
    let frac = (bits & 0x7f_ffff) as u128;
    classify(bits >> 31 != 0, exp == 0xff, exp == 0, frac, 1 << 22)
}

/// Classify a binary64 encoding.
pub fn classify_f64(bits: u64) -> FpClass {
    let exp = (bits >> 52) & 0x7ff;
    let frac = (bits & 0xf_ffff_ffff_ffff) as u128;
    classify(bits >> 63 != 0, exp == 0x7ff, exp == 0, frac, 1 << 51)
}

/// Classify a binary128 encoding.
pub fn classify_f128(bits: u128) -> FpClass {
    let exp = ((bits >> 112) & 0x7fff) as u32;
    let frac = bits & ((1u128 << 112) - 1);
    classify(bits >> 127 != 0, exp == 0x7fff, exp == 0, frac, 1 << 111)
}
