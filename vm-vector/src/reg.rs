//! Vector registers and the register file.
//!
//! A register is an opaque byte container; how a logical lane index maps to a
//! byte offset is a property of the register file (the target's byte order),
//! supplied here rather than computed ad hoc at call sites. The register file
//! also owns the two pieces of cross-lane mutable state: the sticky
//! saturation accumulator and the floating-point status word.

use vm_scalar::flags::Sticky;
use vm_scalar::fp::FpStatus;

use crate::elem::ElementWidth;

/// Logical-lane to byte-offset mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneOrder {
    /// Lane 0 occupies the lowest byte addresses, little-endian within a lane.
    Little,
    /// Lane 0 occupies the highest byte addresses, big-endian within a lane.
    Big,
}

/// A fixed-size, byte-addressable vector register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorReg {
    bytes: Vec<u8>,
}

impl VectorReg {
    /// A zeroed register of `size` bytes.
    pub fn new(size: usize) -> Self {
        VectorReg { bytes: vec![0; size] }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        VectorReg { bytes: bytes.to_vec() }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    fn lane_offset(&self, order: LaneOrder, elem: ElementWidth, idx: usize) -> usize {
        let es = elem.bytes();
        assert!(
            (idx + 1) * es <= self.bytes.len(),
            "lane {idx} of {elem} elements is outside a {}-byte register",
            self.bytes.len()
        );
        match order {
            LaneOrder::Little => idx * es,
            LaneOrder::Big => self.bytes.len() - (idx + 1) * es,
        }
    }

    /// Read lane `idx` as a zero-extended value.
    pub fn read_lane(&self, order: LaneOrder, elem: ElementWidth, idx: usize) -> u128 {
        let es = elem.bytes();
        let off = self.lane_offset(order, elem, idx);
        let mut v = 0u128;
        match order {
            LaneOrder::Little => {
                for (i, b) in self.bytes[off..off + es].iter().enumerate() {
                    v |= (*b as u128) << (8 * i);
                }
            }
            LaneOrder::Big => {
                for b in &self.bytes[off..off + es] {
                    v = (v << 8) | *b as u128;
                }
            }
        }
        v
    }

    /// Write lane `idx`; bits above the element width are ignored.
    pub fn write_lane(&mut self, order: LaneOrder, elem: ElementWidth, idx: usize, value: u128) {
        let es = elem.bytes();
        let off = self.lane_offset(order, elem, idx);
        match order {
            LaneOrder::Little => {
                for i in 0..es {
                    self.bytes[off + i] = (value >> (8 * i)) as u8;
                }
            }
            LaneOrder::Big => {
                for i in 0..es {
                    self.bytes[off + es - 1 - i] = (value >> (8 * i)) as u8;
                }
            }
        }
    }
}

/// Identifier of a register within a [`VecRegFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VecRegId(pub usize);

/// The vector register file plus the instruction-scoped flag state.
///
/// The expansion engine borrows this for the duration of one operation; it is
/// owned by the surrounding CPU-state container and passed explicitly (no
/// cached singletons).
#[derive(Debug, Clone)]
pub struct VecRegFile {
    regs: Vec<VectorReg>,
    order: LaneOrder,
    /// Sticky saturation accumulator, OR-only; cleared by the caller where the
    /// architecture says so, never by the engine.
    pub qc: Sticky,
    /// Floating-point status: ambient rounding mode, accumulated exception
    /// flags, trap-enable mask.
    pub fp: FpStatus,
}

impl VecRegFile {
    pub fn new(count: usize, reg_size: usize, order: LaneOrder) -> Self {
        VecRegFile {
            regs: (0..count).map(|_| VectorReg::new(reg_size)).collect(),
            order,
            qc: Sticky::new(),
            fp: FpStatus::new(),
        }
    }

    pub fn order(&self) -> LaneOrder {
        self.order
    }

    pub fn reg(&self, id: VecRegId) -> &VectorReg {
        &self.regs[id.0]
    }

    pub fn reg_mut(&mut self, id: VecRegId) -> &mut VectorReg {
        &mut self.regs[id.0]
    }

    /// Convenience lane accessors used by tests and the decode layer.
    pub fn read_lane(&self, id: VecRegId, elem: ElementWidth, idx: usize) -> u128 {
        self.reg(id).read_lane(self.order, elem, idx)
    }

    pub fn write_lane(&mut self, id: VecRegId, elem: ElementWidth, idx: usize, value: u128) {
        let order = self.order;
        self.reg_mut(id).write_lane(order, elem, idx, value)
    }
}
