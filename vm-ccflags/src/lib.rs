//! Condition-code calculator
//!
//! Each instruction that sets a condition code records its operation kind and
//! up to three operand snapshots (src, dst, vr); the architectural code in
//! 0..=3 is then recomputed from scratch whenever it is needed. The calculator
//! is a stateless total function: any operand combination maps to a code,
//! there is no failure path.

pub mod calc;
pub mod ops;

pub use calc::compute_cc;
pub use ops::{CcOp, CcWidth};
