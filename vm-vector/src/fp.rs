//! Floating-point lane expansion.
//!
//! Each lane runs against a scratch status word seeded with the ambient
//! rounding mode and trap mask; raised flags are OR-merged into the register
//! file once, after the loop. In stop-on-trap mode the first lane whose
//! raised flags are trap-enabled aborts the instruction before anything is
//! committed (no destination bytes, no flags).

use log::trace;
use thiserror::Error;

use vm_scalar::flags::FpFlags;
use vm_scalar::fp::{FpStatus, RoundingMode, ScopedRounding, fp_max, fp_min, round_to_int};

use crate::desc::OpDesc;
use crate::elem::ElementWidth;
use crate::ops::{FpBinOp, FpUnOp};
use crate::reg::{VecRegFile, VecRegId, VectorReg};

/// Trap handling policy for one expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpMode {
    /// Run every lane, accumulate all flags; the caller inspects traps after.
    AllLanes,
    /// Abort at the first lane whose raised flags are trap-enabled.
    StopOnTrap,
}

/// A lane raised an exception whose trap is enabled.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("floating-point trap at lane {lane}: {flags}")]
pub struct FpTrap {
    pub lane: usize,
    pub flags: FpFlags,
}

fn fp_widths_only(elem: ElementWidth) {
    assert!(
        matches!(elem, ElementWidth::B32 | ElementWidth::B64),
        "floating-point expansion requires 32 or 64-bit lanes, got {elem}"
    );
}

fn apply_bin_f32(op: FpBinOp, a: f32, b: f32, st: &mut FpStatus) -> f32 {
    match op {
        FpBinOp::Min(ty) => fp_min(a, b, ty, st),
        FpBinOp::Max(ty) => fp_max(a, b, ty, st),
    }
}

fn apply_bin_f64(op: FpBinOp, a: f64, b: f64, st: &mut FpStatus) -> f64 {
    match op {
        FpBinOp::Min(ty) => fp_min(a, b, ty, st),
        FpBinOp::Max(ty) => fp_max(a, b, ty, st),
    }
}

/// Two-source floating-point expansion (min/max flavors).
pub fn expand_fp_3(
    rf: &mut VecRegFile,
    desc: OpDesc,
    op: FpBinOp,
    d: VecRegId,
    n: VecRegId,
    m: VecRegId,
    mode: FpMode,
) -> Result<(), FpTrap> {
    fp_widths_only(desc.elem());
    assert_eq!(rf.reg(d).size(), desc.maxsz(), "destination register size mismatch");

    trace!("expand fp {op:?}: {} lanes of {}", desc.lanes(), desc.elem());
    let order = rf.order();
    let elem = desc.elem();
    let snap_n = rf.reg(n).clone();
    let snap_m = rf.reg(m).clone();
    let mut tmp = VectorReg::new(desc.maxsz());
    let base = rf.fp;
    let mut acc = FpFlags::empty();

    for i in 0..desc.lanes() {
        let mut scratch = FpStatus {
            rounding: base.rounding,
            flags: FpFlags::empty(),
            traps: base.traps,
        };
        let r: u128 = match elem {
            ElementWidth::B32 => {
                let a = f32::from_bits(snap_n.read_lane(order, elem, i) as u32);
                let b = f32::from_bits(snap_m.read_lane(order, elem, i) as u32);
                apply_bin_f32(op, a, b, &mut scratch).to_bits() as u128
            }
            ElementWidth::B64 => {
                let a = f64::from_bits(snap_n.read_lane(order, elem, i) as u64);
                let b = f64::from_bits(snap_m.read_lane(order, elem, i) as u64);
                apply_bin_f64(op, a, b, &mut scratch).to_bits() as u128
            }
            _ => unreachable!(),
        };
        if mode == FpMode::StopOnTrap && scratch.trap_pending() {
            return Err(FpTrap { lane: i, flags: scratch.flags });
        }
        acc.insert(scratch.flags);
        tmp.write_lane(order, elem, i, r);
    }

    rf.fp.flags.insert(acc);
    *rf.reg_mut(d) = tmp;
    Ok(())
}

/// One-source floating-point expansion (round-to-integral), optionally under
/// a rounding-mode override that is restored on every exit path.
pub fn expand_fp_2(
    rf: &mut VecRegFile,
    desc: OpDesc,
    op: FpUnOp,
    d: VecRegId,
    n: VecRegId,
    mode: FpMode,
    rounding: Option<RoundingMode>,
) -> Result<(), FpTrap> {
    fp_widths_only(desc.elem());
    assert_eq!(rf.reg(d).size(), desc.maxsz(), "destination register size mismatch");

    trace!("expand fp {op:?}: {} lanes of {}", desc.lanes(), desc.elem());
    let order = rf.order();
    let elem = desc.elem();
    let lanes = desc.lanes();
    let snap_n = rf.reg(n).clone();
    let mut tmp = VectorReg::new(desc.maxsz());

    let mut run = |fp: &mut FpStatus| -> Result<FpFlags, FpTrap> {
        let mut acc = FpFlags::empty();
        for i in 0..lanes {
            let mut scratch = FpStatus {
                rounding: fp.rounding,
                flags: FpFlags::empty(),
                traps: fp.traps,
            };
            let r: u128 = match elem {
                ElementWidth::B32 => {
                    let x = f32::from_bits(snap_n.read_lane(order, elem, i) as u32);
                    let v = match op {
                        FpUnOp::RoundToInt => round_to_int(x, &mut scratch),
                    };
                    v.to_bits() as u128
                }
                ElementWidth::B64 => {
                    let x = f64::from_bits(snap_n.read_lane(order, elem, i) as u64);
                    let v = match op {
                        FpUnOp::RoundToInt => round_to_int(x, &mut scratch),
                    };
                    v.to_bits() as u128
                }
                _ => unreachable!(),
            };
            if mode == FpMode::StopOnTrap && scratch.trap_pending() {
                return Err(FpTrap { lane: i, flags: scratch.flags });
            }
            acc.insert(scratch.flags);
            tmp.write_lane(order, elem, i, r);
        }
        Ok(acc)
    };

    let acc = match rounding {
        Some(over) => {
            let mut guard = ScopedRounding::new(&mut rf.fp, over);
            run(guard.status())?
        }
        None => run(&mut rf.fp)?,
    };

    rf.fp.flags.insert(acc);
    *rf.reg_mut(d) = tmp;
    Ok(())
}
