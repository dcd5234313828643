//! Lane min/max with the five architectural flavors.
//!
//! Every flavor differs from IEEE minNum in a different, named way, so the
//! flavor dispatch is an explicit enumerated match on the (NaN, signed-zero)
//! patterns rather than being folded into the numeric compare. A signaling
//! NaN raises invalid in every flavor; what is returned, and whether a quiet
//! NaN also raises invalid, is per-flavor.

use serde::{Deserialize, Serialize};

use crate::flags::FpFlags;
use crate::fp::classify::{FpClass, classify_f32, classify_f64};
use crate::fp::status::FpStatus;

/// Which architectural min/max semantics to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinMaxType {
    /// IEEE-754-2008 minNum/maxNum: quiet NaNs are discarded in favor of the
    /// numeric operand; signaling NaNs raise invalid and are returned quieted.
    Ieee,
    /// Java-style: signaling NaNs raise invalid and are returned quieted;
    /// quiet NaNs are silently discarded.
    Java,
    /// C-macro style (`a < b ? a : b`): any NaN raises invalid, b is returned.
    CMacro,
    /// C++ std::min/max style: any NaN raises invalid, a is returned.
    Cpp,
    /// The "F" flavor: NaNs are discarded without extra flagging; with two
    /// NaNs, a wins.
    F,
}

/// A float width the min/max primitives operate on.
pub trait FloatLane: Copy + PartialOrd {
    fn classify(self) -> FpClass;
    /// Set the quiet bit, preserving sign and payload.
    fn silence(self) -> Self;
}

impl FloatLane for f32 {
    fn classify(self) -> FpClass {
        classify_f32(self.to_bits())
    }
    fn silence(self) -> Self {
        f32::from_bits(self.to_bits() | (1 << 22))
    }
}

impl FloatLane for f64 {
    fn classify(self) -> FpClass {
        classify_f64(self.to_bits())
    }
    fn silence(self) -> Self {
        f64::from_bits(self.to_bits() | (1 << 51))
    }
}

/// Which operand a flavor selects, before the numeric compare runs.
enum Pick<F> {
    Value(F),
    Numeric,
}

fn resolve_special<F: FloatLane>(
    a: F,
    b: F,
    ty: MinMaxType,
    min: bool,
    st: &mut FpStatus,
) -> Pick<F> {
    let ca = a.classify();
    let cb = b.classify();

    if ca.is_nan() || cb.is_nan() {
        if ca.is_signaling() || cb.is_signaling() {
            st.raise(FpFlags::INVALID);
        }
        return Pick::Value(match ty {
            MinMaxType::Ieee | MinMaxType::Java => {
                if ca.is_signaling() {
                    a.silence()
                } else if cb.is_signaling() {
                    b.silence()
                } else if ca.is_nan() && cb.is_nan() {
                    a
                } else if ca.is_nan() {
                    // Quiet NaN discarded in favor of the numeric operand.
                    b
                } else {
                    a
                }
            }
            MinMaxType::CMacro => {
                st.raise(FpFlags::INVALID);
                b
            }
            MinMaxType::Cpp => {
                st.raise(FpFlags::INVALID);
                a
            }
            MinMaxType::F => {
                if cb.is_nan() { a } else { b }
            }
        });
    }

    if ca.is_zero() && cb.is_zero() {
        // +0 and -0 compare equal numerically; the flavor dictates the sign
        // that wins. For max the preference flips.
        let a_wins = match ty {
            MinMaxType::Ieee | MinMaxType::Java | MinMaxType::F => ca.negative == min,
            MinMaxType::CMacro => false,
            MinMaxType::Cpp => true,
        };
        return Pick::Value(if a_wins { a } else { b });
    }

    Pick::Numeric
}

/// Flavored minimum.
pub fn fp_min<F: FloatLane>(a: F, b: F, ty: MinMaxType, st: &mut FpStatus) -> F {
    match resolve_special(a, b, ty, true, st) {
        Pick::Value(v) => v,
        Pick::Numeric => {
            if a <= b { a } else { b }
        }
    }
}

/// Flavored maximum.
pub fn fp_max<F: FloatLane>(a: F, b: F, ty: MinMaxType, st: &mut FpStatus) -> F {
    match resolve_special(a, b, ty, false, st) {
        Pick::Value(v) => v,
        Pick::Numeric => {
            if a >= b { a } else { b }
        }
    }
}
