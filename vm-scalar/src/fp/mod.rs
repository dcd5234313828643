//! Floating-point scalar primitives.
//!
//! Arithmetic is carried out on host floats; everything the host cannot report
//! faithfully (NaN signaling-ness, data classes, exception flags) is derived
//! from the raw encodings and tracked in the caller's [`FpStatus`].

pub mod classify;
pub mod minmax;
pub mod round;
pub mod status;

pub use classify::{FpClass, FpKind, classify_f32, classify_f64, classify_f128};
pub use minmax::{FloatLane, MinMaxType, fp_max, fp_min};
pub use round::{RoundLane, round_to_int};
pub use status::{FpStatus, RoundingMode, ScopedRounding};
