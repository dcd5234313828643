//! Integer lane expansion.
//!
//! Shared discipline for every operation: snapshot the sources (and the
//! destination, for accumulating ops), compute all lanes into a zeroed
//! temporary, then commit the temporary and the aggregated sticky bits once.
//! Committing the full-size temporary is also what clears the tail between
//! the logical and physical sizes.

use log::trace;

use vm_scalar::flags::Sticky;
use vm_scalar::lane::{SignedLane, UnsignedLane};
use vm_scalar::{absdiff, clmul, halving, sat, shift};

use crate::backend::{HostBackend, VecBackend};
use crate::desc::OpDesc;
use crate::elem::ElementWidth;
use crate::ops::{ShiftImmOp, VecOp};
use crate::reg::{LaneOrder, VecRegFile, VecRegId, VectorReg};

fn rd<U: UnsignedLane>(r: &VectorReg, order: LaneOrder, elem: ElementWidth, i: usize) -> U {
    U::from_u128(r.read_lane(order, elem, i))
}

fn read_u64_le(bytes: &[u8], off: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[off..off + 8]);
    u64::from_le_bytes(buf)
}

fn lanes_3<U: UnsignedLane>(
    op: VecOp,
    desc: OpDesc,
    order: LaneOrder,
    snap_d: &VectorReg,
    snap_n: &VectorReg,
    snap_m: &VectorReg,
    tmp: &mut VectorReg,
    qc: &mut Sticky,
) {
    let elem = desc.elem();
    for i in 0..desc.lanes() {
        let nn: U = rd(snap_n, order, elem, i);
        let mm: U = rd(snap_m, order, elem, i);
        let dd: U = rd(snap_d, order, elem, i);
        // The variable-shift amount is the signed low byte of the m lane.
        let sh = mm.to_u64() as u8 as i8;
        let r: U = match op {
            VecOp::Add => nn.wrapping_add(mm),
            VecOp::Sub => nn.wrapping_sub(mm),
            VecOp::Mul => nn.wrapping_mul(mm),
            VecOp::UqAdd => sat::uqadd(nn, mm, qc),
            VecOp::UqSub => sat::uqsub(nn, mm, qc),
            VecOp::SqAdd => sat::sqadd(nn.as_signed(), mm.as_signed(), qc).as_unsigned(),
            VecOp::SqSub => sat::sqsub(nn.as_signed(), mm.as_signed(), qc).as_unsigned(),
            VecOp::Shadd => halving::shadd(nn.as_signed(), mm.as_signed()).as_unsigned(),
            VecOp::Uhadd => halving::uhadd(nn, mm),
            VecOp::Srhadd => halving::srhadd(nn.as_signed(), mm.as_signed()).as_unsigned(),
            VecOp::Urhadd => halving::urhadd(nn, mm),
            VecOp::Shsub => halving::shsub(nn.as_signed(), mm.as_signed()).as_unsigned(),
            VecOp::Uhsub => halving::uhsub(nn, mm),
            VecOp::Sabd => absdiff::sabd(nn.as_signed(), mm.as_signed()).as_unsigned(),
            VecOp::Uabd => absdiff::uabd(nn, mm),
            VecOp::Saba => {
                absdiff::saba(dd.as_signed(), nn.as_signed(), mm.as_signed()).as_unsigned()
            }
            VecOp::Uaba => absdiff::uaba(dd, nn, mm),
            VecOp::Sshl => shift::sshl(nn.as_signed(), sh).as_unsigned(),
            VecOp::Ushl => shift::ushl(nn, sh),
        };
        tmp.write_lane(order, elem, i, r.to_u128());
    }
}

/// Three-operand expansion through an explicit backend. The native packed
/// path is taken when the backend supports the (op, width) pairing and the
/// operand layout permits it; otherwise the per-lane helper runs. Both paths
/// produce identical bytes and flags.
pub fn expand_3_with(
    rf: &mut VecRegFile,
    backend: &dyn VecBackend,
    desc: OpDesc,
    op: VecOp,
    d: VecRegId,
    n: VecRegId,
    m: VecRegId,
) {
    assert!(op.supported(desc.elem()), "vector op {op:?} has no {} form", desc.elem());
    assert_eq!(rf.reg(d).size(), desc.maxsz(), "destination register size mismatch");
    assert!(rf.reg(n).size() >= desc.oprsz() && rf.reg(m).size() >= desc.oprsz());

    let order = rf.order();
    let snap_n = rf.reg(n).clone();
    let snap_m = rf.reg(m).clone();
    let snap_d = rf.reg(d).clone();
    let mut tmp = VectorReg::new(desc.maxsz());
    let mut qc = Sticky::new();

    let native = if order == LaneOrder::Little
        && desc.oprsz() % 8 == 0
        && !op.load_dest()
        && !op.uses_qc()
    {
        backend.packed(op, desc.elem())
    } else {
        None
    };

    match native {
        Some(f) => {
            trace!("expand {op:?}: native packed path, {} bytes", desc.oprsz());
            for off in (0..desc.oprsz()).step_by(8) {
                let a = read_u64_le(snap_n.as_bytes(), off);
                let b = read_u64_le(snap_m.as_bytes(), off);
                tmp.as_bytes_mut()[off..off + 8].copy_from_slice(&f(a, b).to_le_bytes());
            }
        }
        None => {
            trace!("expand {op:?}: helper path, {} lanes of {}", desc.lanes(), desc.elem());
            match desc.elem() {
                ElementWidth::B8 => {
                    lanes_3::<u8>(op, desc, order, &snap_d, &snap_n, &snap_m, &mut tmp, &mut qc)
                }
                ElementWidth::B16 => {
                    lanes_3::<u16>(op, desc, order, &snap_d, &snap_n, &snap_m, &mut tmp, &mut qc)
                }
                ElementWidth::B32 => {
                    lanes_3::<u32>(op, desc, order, &snap_d, &snap_n, &snap_m, &mut tmp, &mut qc)
                }
                ElementWidth::B64 => {
                    lanes_3::<u64>(op, desc, order, &snap_d, &snap_n, &snap_m, &mut tmp, &mut qc)
                }
                ElementWidth::B128 => unreachable!("rejected by VecOp::supported"),
            }
        }
    }

    rf.qc.merge(qc);
    *rf.reg_mut(d) = tmp;
}

/// Three-operand expansion through the default host backend.
pub fn expand_3(rf: &mut VecRegFile, desc: OpDesc, op: VecOp, d: VecRegId, n: VecRegId, m: VecRegId) {
    expand_3_with(rf, &HostBackend, desc, op, d, n, m)
}

fn lanes_2i<U: UnsignedLane>(
    op: ShiftImmOp,
    desc: OpDesc,
    order: LaneOrder,
    snap_d: &VectorReg,
    snap_n: &VectorReg,
    tmp: &mut VectorReg,
    shift: u32,
) {
    let elem = desc.elem();
    for i in 0..desc.lanes() {
        let nn: U = rd(snap_n, order, elem, i);
        let dd: U = rd(snap_d, order, elem, i);
        let r: U = match op {
            ShiftImmOp::Srshr => shift::srshr(nn.as_signed(), shift).as_unsigned(),
            ShiftImmOp::Urshr => shift::urshr(nn, shift),
            ShiftImmOp::Ssra => shift::ssra(dd.as_signed(), nn.as_signed(), shift).as_unsigned(),
            ShiftImmOp::Usra => shift::usra(dd, nn, shift),
            ShiftImmOp::Srsra => shift::srsra(dd.as_signed(), nn.as_signed(), shift).as_unsigned(),
            ShiftImmOp::Ursra => shift::ursra(dd, nn, shift),
        };
        tmp.write_lane(order, elem, i, r.to_u128());
    }
}

/// Immediate-shift expansion. The encoded shift amount is 1..=W.
pub fn expand_2i(
    rf: &mut VecRegFile,
    desc: OpDesc,
    op: ShiftImmOp,
    d: VecRegId,
    n: VecRegId,
    shift: u32,
) {
    assert!(op.supported(desc.elem()), "shift op {op:?} has no {} form", desc.elem());
    assert!(
        shift >= 1 && shift <= desc.elem().bits(),
        "immediate shift {shift} out of range for {} lanes",
        desc.elem()
    );
    assert_eq!(rf.reg(d).size(), desc.maxsz(), "destination register size mismatch");

    trace!("expand {op:?} by {shift}: {} lanes of {}", desc.lanes(), desc.elem());
    let order = rf.order();
    let snap_n = rf.reg(n).clone();
    let snap_d = rf.reg(d).clone();
    let mut tmp = VectorReg::new(desc.maxsz());

    match desc.elem() {
        ElementWidth::B8 => lanes_2i::<u8>(op, desc, order, &snap_d, &snap_n, &mut tmp, shift),
        ElementWidth::B16 => lanes_2i::<u16>(op, desc, order, &snap_d, &snap_n, &mut tmp, shift),
        ElementWidth::B32 => lanes_2i::<u32>(op, desc, order, &snap_d, &snap_n, &mut tmp, shift),
        ElementWidth::B64 => lanes_2i::<u64>(op, desc, order, &snap_d, &snap_n, &mut tmp, shift),
        ElementWidth::B128 => unreachable!("rejected by ShiftImmOp::supported"),
    }

    *rf.reg_mut(d) = tmp;
}

/// Lane-wise move (any width, including 128-bit lanes), clearing the tail.
pub fn expand_mov(rf: &mut VecRegFile, desc: OpDesc, d: VecRegId, n: VecRegId) {
    assert_eq!(rf.reg(d).size(), desc.maxsz(), "destination register size mismatch");
    let order = rf.order();
    let snap_n = rf.reg(n).clone();
    let mut tmp = VectorReg::new(desc.maxsz());
    for i in 0..desc.lanes() {
        let v = snap_n.read_lane(order, desc.elem(), i);
        tmp.write_lane(order, desc.elem(), i, v);
    }
    *rf.reg_mut(d) = tmp;
}

/// Carry-less multiply expansion: each W-bit source lane pair produces one
/// 2W-bit destination lane, so only the first oprsz / 2W source lanes (the
/// operand's low half) participate.
pub fn expand_clmul(rf: &mut VecRegFile, desc: OpDesc, d: VecRegId, n: VecRegId, m: VecRegId) {
    let elem = desc.elem();
    let wide = match elem {
        ElementWidth::B8 => ElementWidth::B16,
        ElementWidth::B16 => ElementWidth::B32,
        ElementWidth::B32 => ElementWidth::B64,
        ElementWidth::B64 => ElementWidth::B128,
        ElementWidth::B128 => unreachable!("carry-less multiply has no 128-bit source form"),
    };
    assert!(desc.oprsz() % wide.bytes() == 0, "operand size must hold whole products");
    assert_eq!(rf.reg(d).size(), desc.maxsz(), "destination register size mismatch");

    let order = rf.order();
    let snap_n = rf.reg(n).clone();
    let snap_m = rf.reg(m).clone();
    let mut tmp = VectorReg::new(desc.maxsz());

    let pairs = desc.oprsz() / wide.bytes();
    for i in 0..pairs {
        let product = match elem {
            ElementWidth::B8 => {
                clmul::clmul(rd::<u8>(&snap_n, order, elem, i), rd::<u8>(&snap_m, order, elem, i))
            }
            ElementWidth::B16 => {
                clmul::clmul(rd::<u16>(&snap_n, order, elem, i), rd::<u16>(&snap_m, order, elem, i))
            }
            ElementWidth::B32 => {
                clmul::clmul(rd::<u32>(&snap_n, order, elem, i), rd::<u32>(&snap_m, order, elem, i))
            }
            ElementWidth::B64 => {
                clmul::clmul(rd::<u64>(&snap_n, order, elem, i), rd::<u64>(&snap_m, order, elem, i))
            }
            ElementWidth::B128 => unreachable!(),
        };
        tmp.write_lane(order, wide, i, product);
    }

    *rf.reg_mut(d) = tmp;
}
