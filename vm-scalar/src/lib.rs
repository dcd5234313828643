//! Scalar arithmetic primitives for lane-wise instruction expansion
//!
//! Every function in this crate computes one result from a handful of
//! fixed-width scalar inputs, with no state of its own. Exceptional numeric
//! conditions never become Rust errors: integer saturation is reported by
//! OR-ing into a caller-supplied [`Sticky`] accumulator, and floating-point
//! conditions are reported through the caller's [`fp::FpStatus`] flags word.
//!
//! Primitives are written once, generically over the lane width, via the
//! [`lane::UnsignedLane`] / [`lane::SignedLane`] traits, and instantiated for
//! 8/16/32/64-bit lanes by the expansion engine.

pub mod absdiff;
pub mod clmul;
pub mod flags;
pub mod fp;
pub mod halving;
pub mod lane;
pub mod sat;
pub mod shift;

pub use flags::{FpFlags, Sticky};
pub use lane::{SignedLane, UnsignedLane};
