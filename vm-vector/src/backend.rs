//! Native-vs-helper execution paths.
//!
//! Each lane operation corresponds either to a routine the host can run
//! across a packed 64-bit chunk in one step, or to the per-lane helper loop.
//! The engine asks the backend first and falls back transparently; the two
//! paths are observably identical (same bytes, same flags), which the
//! differential tests pin down.

use crate::elem::ElementWidth;
use crate::ops::VecOp;

/// A routine processing eight bytes of lanes at once.
pub type PackedFn = fn(u64, u64) -> u64;

/// Capability lookup: which (op, width) pairs the host can run natively.
pub trait VecBackend {
    fn packed(&self, op: VecOp, elem: ElementWidth) -> Option<PackedFn>;
}

/// The default host backend: SWAR implementations of wrapping add/sub for all
/// integer lane widths. Everything else takes the helper path.
pub struct HostBackend;

/// A backend that never claims native support; used to exercise the helper
/// path differentially against [`HostBackend`].
pub struct NoNativeBackend;

impl VecBackend for NoNativeBackend {
    fn packed(&self, _op: VecOp, _elem: ElementWidth) -> Option<PackedFn> {
        None
    }
}

impl VecBackend for HostBackend {
    fn packed(&self, op: VecOp, elem: ElementWidth) -> Option<PackedFn> {
        match (op, elem) {
            (VecOp::Add, ElementWidth::B8) => Some(add_packed::<0x7f7f_7f7f_7f7f_7f7f>),
            (VecOp::Add, ElementWidth::B16) => Some(add_packed::<0x7fff_7fff_7fff_7fff>),
            (VecOp::Add, ElementWidth::B32) => Some(add_packed::<0x7fff_ffff_7fff_ffff>),
            (VecOp::Add, ElementWidth::B64) => Some(u64::wrapping_add),
            (VecOp::Sub, ElementWidth::B8) => Some(sub_packed::<0x7f7f_7f7f_7f7f_7f7f>),
            (VecOp::Sub, ElementWidth::B16) => Some(sub_packed::<0x7fff_7fff_7fff_7fff>),
            (VecOp::Sub, ElementWidth::B32) => Some(sub_packed::<0x7fff_ffff_7fff_ffff>),
            (VecOp::Sub, ElementWidth::B64) => Some(u64::wrapping_sub),
            _ => None,
        }
    }
}

/// Per-lane wrapping add over a packed word. `M` masks off each lane's top
/// bit so carries cannot cross lane boundaries; the top bits are patched back
/// in with XOR.
fn add_packed<const M: u64>(a: u64, b: u64) -> u64 {
    ((a & M).wrapping_add(b & M)) ^ ((a ^ b) & !M)
}

/// Per-lane wrapping subtract: biasing each lane's top bit up front keeps the
/// per-lane borrow from propagating.
fn sub_packed<const M: u64>(a: u64, b: u64) -> u64 {
    ((a | !M).wrapping_sub(b & M)) ^ ((a ^ !b) & !M)
}
