//! Round-to-integral honoring the ambient rounding mode.

use crate::flags::FpFlags;
use crate::fp::classify::FpKind;
use crate::fp::minmax::FloatLane;
use crate::fp::status::{FpStatus, RoundingMode};

/// A float width that can be rounded to an integral value.
pub trait RoundLane: FloatLane {
    fn round_with(self, mode: RoundingMode) -> Self;
}

macro_rules! impl_round_lane {
    ($t:ty) => {
        impl RoundLane for $t {
            fn round_with(self, mode: RoundingMode) -> Self {
                match mode {
                    RoundingMode::NearestEven => self.round_ties_even(),
                    RoundingMode::TowardZero => self.trunc(),
                    RoundingMode::TowardPositive => self.ceil(),
                    RoundingMode::TowardNegative => self.floor(),
                    RoundingMode::TiesAway => self.round(),
                }
            }
        }
    };
}

impl_round_lane!(f32);
impl_round_lane!(f64);

/// Round to an integral value in the status word's rounding mode.
///
/// NaN/infinity/zero pass through unchanged (a signaling NaN raises invalid
/// and is quieted). Inexact is raised iff the value changed.
pub fn round_to_int<F: RoundLane>(x: F, st: &mut FpStatus) -> F {
    let cls = x.classify();
    match cls.kind {
        FpKind::SignalingNan => {
            st.raise(FpFlags::INVALID);
            return x.silence();
        }
        FpKind::QuietNan | FpKind::Infinite | FpKind::Zero => return x,
        FpKind::Subnormal | FpKind::Normal => {}
    }
    let r = x.round_with(st.rounding);
    if r != x {
        st.raise(FpFlags::INEXACT);
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fp::status::ScopedRounding;

    #[test]
    fn test_round_modes_differ_on_halfway() {
        let mut st = FpStatus::new();
        st.rounding = RoundingMode::NearestEven;
        assert_eq!(round_to_int(2.5f64, &mut st), 2.0);
        st.rounding = RoundingMode::TiesAway;
        assert_eq!(round_to_int(2.5f64, &mut st), 3.0);
        st.rounding = RoundingMode::TowardZero;
        assert_eq!(round_to_int(-2.5f64, &mut st), -2.0);
        st.rounding = RoundingMode::TowardNegative;
        assert_eq!(round_to_int(-2.5f64, &mut st), -3.0);
        st.rounding = RoundingMode::TowardPositive;
        assert_eq!(round_to_int(-2.5f64, &mut st), -2.0);
        assert!(st.flags.contains(FpFlags::INEXACT));
    }

    #[test]
    fn test_exact_value_raises_nothing() {
        let mut st = FpStatus::new();
        assert_eq!(round_to_int(4.0f32, &mut st), 4.0);
        assert!(st.flags.is_empty());
    }

    #[test]
    fn test_override_via_scoped_token() {
        let mut st = FpStatus::new();
        {
            let mut guard = ScopedRounding::new(&mut st, RoundingMode::TowardZero);
            assert_eq!(round_to_int(1.9f64, guard.status()), 1.0);
        }
        assert_eq!(st.rounding, RoundingMode::NearestEven);
        assert!(st.flags.contains(FpFlags::INEXACT));
    }
}
