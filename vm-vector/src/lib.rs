//! Lane-wise vector expansion engine
//!
//! Given an element width, operand register ids and an operation, the engine
//! applies the matching `vm-scalar` primitive once per lane across the logical
//! operand size, honoring the contracts the surrounding translator depends on:
//!
//! - sources are snapshotted before any destination lane is written, so a
//!   destination that aliases a source always sees pre-instruction values;
//! - results are computed into a temporary and committed once, after the loop;
//! - per-lane sticky saturation bits are OR-aggregated and merged into the
//!   register file's accumulator exactly once per instruction;
//! - bytes between the logical operand size and the physical register size
//!   are deterministically zeroed, never left stale;
//! - floating-point expansion can stop on the first lane whose raised flags
//!   are trap-enabled, committing nothing.
//!
//! The engine itself has no failure modes. Malformed (operation, width)
//! pairings are decoder bugs and assert at dispatch.

pub mod backend;
pub mod desc;
pub mod elem;
pub mod expand;
pub mod fp;
pub mod ops;
pub mod reg;

pub use backend::{HostBackend, NoNativeBackend, PackedFn, VecBackend};
pub use desc::{DescError, OpDesc};
pub use elem::ElementWidth;
pub use expand::{expand_2i, expand_3, expand_3_with, expand_clmul, expand_mov};
pub use fp::{FpMode, FpTrap, expand_fp_2, expand_fp_3};
pub use ops::{FpBinOp, FpUnOp, ShiftImmOp, VecOp};
pub use reg::{LaneOrder, VecRegFile, VecRegId, VectorReg};
