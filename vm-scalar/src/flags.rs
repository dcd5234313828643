//! Sticky flag accumulators
//!
//! Both accumulators are OR-only within an instruction: a bit set by one lane
//! is never cleared by a later lane. Clearing is the caller's decision, made
//! explicitly before an instruction begins where the architecture requires it.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Sticky saturation accumulator ("QC" register).
///
/// Saturating primitives OR the XOR of their wrapped and clamped results into
/// this value, so any nonzero content means "some lane saturated". The XOR form
/// composes across lanes: OR-ing per-lane contributions can only keep the
/// accumulator nonzero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sticky(u64);

impl Sticky {
    pub const fn new() -> Self {
        Sticky(0)
    }

    /// OR bits into the accumulator. Never clears anything.
    #[inline]
    pub fn or(&mut self, bits: u64) {
        self.0 |= bits;
    }

    /// Fold another accumulator in (used when lanes were computed into a
    /// scratch accumulator that is committed once per instruction).
    #[inline]
    pub fn merge(&mut self, other: Sticky) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub fn bits(&self) -> u64 {
        self.0
    }

    /// Explicit caller-side reset. The expansion layer itself never calls this
    /// on a caller's accumulator.
    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

/// IEEE-754 exception flags, accumulated per instruction and merged into a
/// persistent floating-point control word afterwards.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FpFlags(u8);

impl FpFlags {
    pub const INVALID: FpFlags = FpFlags(1 << 0);
    pub const DIV_BY_ZERO: FpFlags = FpFlags(1 << 1);
    pub const OVERFLOW: FpFlags = FpFlags(1 << 2);
    pub const UNDERFLOW: FpFlags = FpFlags(1 << 3);
    pub const INEXACT: FpFlags = FpFlags(1 << 4);

    pub const fn empty() -> Self {
        FpFlags(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn insert(&mut self, other: FpFlags) {
        self.0 |= other.0;
    }

    #[inline]
    pub const fn contains(self, other: FpFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn intersects(self, other: FpFlags) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for FpFlags {
    type Output = FpFlags;
    fn bitor(self, rhs: FpFlags) -> FpFlags {
        FpFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for FpFlags {
    fn bitor_assign(&mut self, rhs: FpFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for FpFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names = [
            (FpFlags::INVALID, "invalid"),
            (FpFlags::DIV_BY_ZERO, "div-by-zero"),
            (FpFlags::OVERFLOW, "overflow"),
            (FpFlags::UNDERFLOW, "underflow"),
            (FpFlags::INEXACT, "inexact"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticky_or_only() {
        let mut qc = Sticky::new();
        assert!(!qc.is_set());
        qc.or(0x80);
        qc.or(0);
        assert!(qc.is_set());
        assert_eq!(qc.bits(), 0x80);
    }

    #[test]
    fn test_sticky_merge() {
        let mut qc = Sticky::new();
        let mut scratch = Sticky::new();
        scratch.or(0x01);
        qc.merge(scratch);
        assert!(qc.is_set());
    }

    #[test]
    fn test_fp_flags_display() {
        let mut f = FpFlags::empty();
        f.insert(FpFlags::INVALID);
        f.insert(FpFlags::INEXACT);
        assert_eq!(f.to_string(), "invalid|inexact");
        assert!(f.intersects(FpFlags::INVALID));
        assert!(!f.contains(FpFlags::OVERFLOW));
    }
}
