//! x87 instruction structures.
//!
//! Provides the decoded forms of an x87 memory-operand instruction:
//! 1. **ModR/M:** Field extraction from the addressing byte.
//! 2. **Operation:** Which load/store and which operand format.
//! 3. **Instruction:** Operation plus everything needed to compute the effective address.

use std::fmt;

use crate::common::{AddressSize, SegmentReg};
use crate::core::units::fpu::codec::{FistWidth, FstFormat, IntWidth, RealFormat};

/// Fields of a ModR/M byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModRm {
    /// Addressing mode (bits 7:6). `3` selects a register operand.
    pub mode: u8,
    /// Opcode extension (bits 5:3), the `/digit` of x87 encodings.
    pub reg: u8,
    /// Base/index selector (bits 2:0).
    pub rm: u8,
}

impl ModRm {
    /// Splits a ModR/M byte into its fields.
    #[inline(always)]
    pub const fn from_byte(byte: u8) -> Self {
        Self {
            mode: byte >> 6,
            reg: (byte >> 3) & 0b111,
            rm: byte & 0b111,
        }
    }

    /// Returns `true` if the operand is a memory location.
    #[inline(always)]
    pub const fn is_memory(self) -> bool {
        self.mode != 0b11
    }
}

/// A memory-operand x87 load or store.
///
/// The non-popping stores carry narrower payloads: only `FISTP` has an
/// `m64int` form and only `FSTP` has an `m80fp` form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum X87Op {
    /// `FILD`: push an integer operand.
    Fild(IntWidth),
    /// `FIST`: store `ST(0)` as an integer.
    Fist(FistWidth),
    /// `FISTP`: store `ST(0)` as an integer and pop.
    Fistp(IntWidth),
    /// `FLD`: push a real operand.
    Fld(RealFormat),
    /// `FST`: store `ST(0)` as a real.
    Fst(FstFormat),
    /// `FSTP`: store `ST(0)` as a real and pop.
    Fstp(RealFormat),
    /// `FBSTP`: store `ST(0)` as packed BCD and pop.
    Fbstp,
}

impl X87Op {
    /// Fixed cycle cost charged when the instruction completes.
    ///
    /// `FBSTP` is not charged.
    pub const fn cycles(self) -> u64 {
        match self {
            Self::Fild(IntWidth::W16) => 13,
            Self::Fild(IntWidth::W32) => 9,
            Self::Fild(IntWidth::W64) => 10,
            Self::Fist(FistWidth::W32) | Self::Fistp(IntWidth::W32) => 28,
            Self::Fist(FistWidth::W16) | Self::Fistp(IntWidth::W16 | IntWidth::W64) => 29,
            Self::Fld(RealFormat::Single | RealFormat::Double) => 3,
            Self::Fld(RealFormat::Extended) | Self::Fstp(RealFormat::Extended) => 6,
            Self::Fst(FstFormat::Single) | Self::Fstp(RealFormat::Single) => 7,
            Self::Fst(FstFormat::Double) | Self::Fstp(RealFormat::Double) => 8,
            Self::Fbstp => 0,
        }
    }

    /// Size of the memory operand in bytes.
    pub const fn operand_bytes(self) -> u32 {
        match self {
            Self::Fild(w) | Self::Fistp(w) => w.bytes(),
            Self::Fist(w) => w.widen().bytes(),
            Self::Fld(f) | Self::Fstp(f) => f.bytes(),
            Self::Fst(f) => f.widen().bytes(),
            Self::Fbstp => 10,
        }
    }

    /// Returns `true` for loads (the stack grows by one).
    pub const fn is_load(self) -> bool {
        matches!(self, Self::Fild(_) | Self::Fld(_))
    }

    /// Returns `true` for stores that pop the stack.
    pub const fn pops(self) -> bool {
        matches!(self, Self::Fistp(_) | Self::Fstp(_) | Self::Fbstp)
    }

    /// Lower-case mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Fild(_) => "fild",
            Self::Fist(_) => "fist",
            Self::Fistp(_) => "fistp",
            Self::Fld(_) => "fld",
            Self::Fst(_) => "fst",
            Self::Fstp(_) => "fstp",
            Self::Fbstp => "fbstp",
        }
    }
}

impl fmt::Display for X87Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fild(w) | Self::Fistp(w) => write!(f, "{} {w}", self.mnemonic()),
            Self::Fist(w) => write!(f, "{} {w}", self.mnemonic()),
            Self::Fld(r) | Self::Fstp(r) => write!(f, "{} {r}", self.mnemonic()),
            Self::Fst(r) => write!(f, "{} {r}", self.mnemonic()),
            Self::Fbstp => f.write_str("fbstp m80bcd"),
        }
    }
}

/// A fully decoded x87 memory-operand instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct X87Instruction {
    /// The load/store to perform.
    pub op: X87Op,
    /// Addressing byte.
    pub modrm: ModRm,
    /// SIB byte (32-bit addressing with `rm = 4` only).
    pub sib: Option<u8>,
    /// Sign-extended displacement (zero when absent).
    pub disp: i32,
    /// Addressing mode the operand is computed under.
    pub address_size: AddressSize,
    /// Segment named by an override prefix.
    pub segment_override: Option<SegmentReg>,
    /// Encoded length in bytes, prefixes included.
    pub len: usize,
}
