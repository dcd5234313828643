//! Closed operation enumerations crossing the decode boundary.

use serde::{Deserialize, Serialize};
use vm_scalar::fp::MinMaxType;

use crate::elem::ElementWidth;

/// Three-operand (d, n, m) integer lane operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VecOp {
    /// Wrapping arithmetic.
    Add,
    Sub,
    Mul,
    /// Saturating arithmetic; reports into the sticky accumulator.
    UqAdd,
    UqSub,
    SqAdd,
    SqSub,
    /// Halving arithmetic (truncating and rounding).
    Shadd,
    Uhadd,
    Srhadd,
    Urhadd,
    Shsub,
    Uhsub,
    /// Absolute difference and its accumulating form.
    Sabd,
    Uabd,
    Saba,
    Uaba,
    /// Variable per-lane shifts; the amount is the signed low byte of m.
    Sshl,
    Ushl,
}

impl VecOp {
    /// Whether the destination's prior value is an operand.
    pub fn load_dest(self) -> bool {
        matches!(self, VecOp::Saba | VecOp::Uaba)
    }

    /// Whether the operation reports into the sticky saturation accumulator.
    pub fn uses_qc(self) -> bool {
        matches!(self, VecOp::UqAdd | VecOp::UqSub | VecOp::SqAdd | VecOp::SqSub)
    }

    /// Integer lane primitives exist for 8..64-bit lanes. A 128-bit pairing
    /// is a decoder bug and asserts at dispatch.
    pub fn supported(self, elem: ElementWidth) -> bool {
        elem != ElementWidth::B128
    }
}

/// Immediate-shift (d, n, shift) operations. Shift amounts are 1..=W.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftImmOp {
    /// Rounded shift right.
    Srshr,
    Urshr,
    /// Shift right and accumulate.
    Ssra,
    Usra,
    /// Rounded shift right and accumulate.
    Srsra,
    Ursra,
}

impl ShiftImmOp {
    pub fn load_dest(self) -> bool {
        matches!(
            self,
            ShiftImmOp::Ssra | ShiftImmOp::Usra | ShiftImmOp::Srsra | ShiftImmOp::Ursra
        )
    }

    pub fn supported(self, elem: ElementWidth) -> bool {
        elem != ElementWidth::B128
    }
}

/// Two-source floating-point lane operations (32/64-bit lanes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FpBinOp {
    Min(MinMaxType),
    Max(MinMaxType),
}

/// One-source floating-point lane operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FpUnOp {
    /// Round to integral in the ambient (or overridden) rounding mode.
    RoundToInt,
}
