//! The closed enumeration of condition-code operation kinds.

use serde::{Deserialize, Serialize};

/// Operand width a kind evaluates at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CcWidth {
    W32,
    W64,
}

/// Condition-code operation kinds.
///
/// Operand roles per kind follow the recording convention: `src` and `dst`
/// are the operand snapshots, `vr` is the numeric result where the kind
/// needs it (overflow classification cannot be recovered from the result
/// alone).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CcOp {
    /// Fixed codes, used when the translator already knows the outcome.
    Const0,
    Const1,
    Const2,
    Const3,
    /// 0 if dst is zero, else 1.
    Nz,
    /// Three-way signed compare of dst against zero.
    Ltgt0(CcWidth),
    /// Three-way signed compare: 0 equal, 1 src < dst, 2 src > dst.
    Ltgt(CcWidth),
    /// Three-way unsigned compare.
    Ltugtu(CcWidth),
    /// Test under mask: src is the value, dst the mask.
    Tm(CcWidth),
    /// Signed add: src + dst = vr, 3 on overflow, else sign of vr.
    Add(CcWidth),
    /// Unsigned (logical) add: carry/zero classification.
    Addu(CcWidth),
    /// Signed subtract: src - dst = vr.
    Sub(CcWidth),
    /// Unsigned (logical) subtract: borrow/zero classification.
    Subu(CcWidth),
    /// Absolute value result in dst; 3 iff the minimum value overflowed.
    Abs(CcWidth),
    /// Negated absolute value result in dst.
    Nabs(CcWidth),
    /// Two's complement result in dst; 3 iff the minimum value overflowed.
    Comp(CcWidth),
    /// Signed multiply: 3 iff the product did not fit the width.
    Muls(CcWidth),
    /// Arithmetic shift left: src is the value, dst the shift amount.
    Sla(CcWidth),
    /// Insert characters under mask: src is the mask, dst the inserted value.
    Icm,
    /// Find leftmost one: 0 if dst is zero, else 2.
    Flogr,
    /// Nonzero/sign classification of a float32 in the low bits of dst.
    NzF32,
    /// Nonzero/sign classification of a float64 in dst.
    NzF64,
    /// Nonzero/sign classification of a float128; src holds the high half,
    /// dst the low half.
    NzF128,
    /// Vector-compare summary from two match accumulators (src, dst).
    VecCompare,
}
