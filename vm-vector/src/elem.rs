//! Element width selector.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The per-operation element width ("vece"): how many bits one lane holds.
/// A vector register has no inherent element typing; this selector is supplied
/// with every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementWidth {
    B8,
    B16,
    B32,
    B64,
    B128,
}

impl ElementWidth {
    pub const fn bits(self) -> u32 {
        match self {
            ElementWidth::B8 => 8,
            ElementWidth::B16 => 16,
            ElementWidth::B32 => 32,
            ElementWidth::B64 => 64,
            ElementWidth::B128 => 128,
        }
    }

    pub const fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Number of complete lanes in an operand of `oprsz` bytes.
    pub const fn lanes(self, oprsz: usize) -> usize {
        oprsz / self.bytes()
    }
}

impl fmt::Display for ElementWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
