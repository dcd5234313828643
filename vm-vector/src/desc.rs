//! Operation descriptor: element width plus logical/physical operand sizes.
//!
//! Validation happens once, at construction, on the decode side of the
//! boundary. A descriptor that exists is well-formed; the expansion engine
//! only asserts, it never re-validates.

use thiserror::Error;

use crate::elem::ElementWidth;

/// Errors a decode layer can make when describing an operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescError {
    #[error("operand size must be nonzero")]
    Empty,
    #[error("operand size {oprsz} is not a multiple of the {elem} element size")]
    Misaligned { oprsz: usize, elem: ElementWidth },
    #[error("logical operand size {oprsz} exceeds register size {maxsz}")]
    TooLarge { oprsz: usize, maxsz: usize },
    #[error("register size {maxsz} is not a multiple of the {elem} element size")]
    BadRegisterSize { maxsz: usize, elem: ElementWidth },
}

/// Validated per-operation shape: all lane loops derive from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpDesc {
    elem: ElementWidth,
    oprsz: usize,
    maxsz: usize,
}

impl OpDesc {
    /// `oprsz` is the logical operand size in bytes (the "current vector
    /// length"); `maxsz` is the physical register size. Lanes beyond `oprsz`
    /// are cleared by every operation.
    pub fn new(elem: ElementWidth, oprsz: usize, maxsz: usize) -> Result<Self, DescError> {
        if oprsz == 0 {
            return Err(DescError::Empty);
        }
        if oprsz % elem.bytes() != 0 {
            return Err(DescError::Misaligned { oprsz, elem });
        }
        if oprsz > maxsz {
            return Err(DescError::TooLarge { oprsz, maxsz });
        }
        if maxsz % elem.bytes() != 0 {
            return Err(DescError::BadRegisterSize { maxsz, elem });
        }
        Ok(OpDesc { elem, oprsz, maxsz })
    }

    pub fn elem(&self) -> ElementWidth {
        self.elem
    }

    pub fn oprsz(&self) -> usize {
        self.oprsz
    }

    pub fn maxsz(&self) -> usize {
        self.maxsz
    }

    /// Number of lanes the operation processes.
    pub fn lanes(&self) -> usize {
        self.elem.lanes(self.oprsz)
    }
}
