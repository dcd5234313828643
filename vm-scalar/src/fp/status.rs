//! Floating-point status word and the scoped rounding-mode token.

use serde::{Deserialize, Serialize};

use crate::flags::FpFlags;

/// IEEE-754 rounding mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Round to nearest, ties to even (the reset default).
    NearestEven,
    /// Round toward zero (truncate).
    TowardZero,
    /// Round toward +infinity.
    TowardPositive,
    /// Round toward -infinity.
    TowardNegative,
    /// Round to nearest, ties away from zero.
    TiesAway,
}

impl Default for RoundingMode {
    fn default() -> Self {
        RoundingMode::NearestEven
    }
}

/// Per-CPU floating-point state seen by the primitives: the ambient rounding
/// mode, the accumulated exception flags, and the trap-enable mask.
///
/// Flags are OR-accumulated; whether a raised flag becomes an architectural
/// trap is the caller's decision, taken against `traps` after (or, in
/// stop-on-trap expansion, during) the instruction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FpStatus {
    pub rounding: RoundingMode,
    pub flags: FpFlags,
    pub traps: FpFlags,
}

impl FpStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// OR exception flags into the status word.
    #[inline]
    pub fn raise(&mut self, flags: FpFlags) {
        self.flags.insert(flags);
    }

    /// True if any currently-raised flag has its trap enabled.
    #[inline]
    pub fn trap_pending(&self) -> bool {
        self.flags.intersects(self.traps)
    }
}

/// Scoped rounding-mode override.
///
/// The ambient rounding mode is CPU-state-wide; an instruction with an
/// explicit rounding override swaps it in for the duration of the operation
/// and must restore it on every exit path, including flagged-exception paths.
/// Restoration lives in `Drop` so no path can skip it.
pub struct ScopedRounding<'a> {
    status: &'a mut FpStatus,
    saved: RoundingMode,
}

impl<'a> ScopedRounding<'a> {
    pub fn new(status: &'a mut FpStatus, mode: RoundingMode) -> Self {
        let saved = status.rounding;
        status.rounding = mode;
        ScopedRounding { status, saved }
    }

    pub fn status(&mut self) -> &mut FpStatus {
        self.status
    }
}

impl Drop for ScopedRounding<'_> {
    fn drop(&mut self) {
        self.status.rounding = self.saved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_rounding_restores() {
        let mut st = FpStatus::new();
        st.rounding = RoundingMode::TowardZero;
        {
            let mut guard = ScopedRounding::new(&mut st, RoundingMode::TiesAway);
            assert_eq!(guard.status().rounding, RoundingMode::TiesAway);
        }
        assert_eq!(st.rounding, RoundingMode::TowardZero);
    }

    #[test]
    fn test_scoped_rounding_restores_on_panic_path() {
        let mut st = FpStatus::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = ScopedRounding::new(&mut st, RoundingMode::TowardPositive);
            panic!("lane raised");
        }));
        assert!(result.is_err());
        assert_eq!(st.rounding, RoundingMode::NearestEven);
    }

    #[test]
    fn test_trap_pending() {
        let mut st = FpStatus::new();
        st.traps = FpFlags::INVALID;
        st.raise(FpFlags::INEXACT);
        assert!(!st.trap_pending());
        st.raise(FpFlags::INVALID);
        assert!(st.trap_pending());
    }
}
