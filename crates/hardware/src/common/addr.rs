//! Segmented address types.
//!
//! This module defines the address vocabulary shared by the CPU and the memory bus. It provides:
//! 1. **Segment Registers:** The six x86 segment registers an operand may be relative to.
//! 2. **Segmented Addresses:** A `(segment, offset)` pair as produced by effective-address resolution.
//! 3. **Address Size:** The 16-bit or 32-bit addressing mode an instruction decodes under.

use std::fmt;

/// x86 segment register selecting the base and limit an offset is checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SegmentReg {
    /// Extra segment.
    Es = 0,
    /// Code segment.
    Cs = 1,
    /// Stack segment.
    Ss = 2,
    /// Data segment (default for most memory operands).
    Ds = 3,
    /// Additional data segment FS.
    Fs = 4,
    /// Additional data segment GS.
    Gs = 5,
}

impl SegmentReg {
    /// Returns the encoding index (0-5), usable as a table index.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Maps a segment-override prefix byte to its segment register.
    ///
    /// Returns `None` if `prefix` is not one of `26 2E 36 3E 64 65`.
    pub const fn from_prefix(prefix: u8) -> Option<Self> {
        match prefix {
            0x26 => Some(Self::Es),
            0x2E => Some(Self::Cs),
            0x36 => Some(Self::Ss),
            0x3E => Some(Self::Ds),
            0x64 => Some(Self::Fs),
            0x65 => Some(Self::Gs),
            _ => None,
        }
    }
}

impl fmt::Display for SegmentReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Es => "ES",
            Self::Cs => "CS",
            Self::Ss => "SS",
            Self::Ds => "DS",
            Self::Fs => "FS",
            Self::Gs => "GS",
        };
        f.write_str(name)
    }
}

/// A resolved memory operand: segment register plus offset within that segment.
///
/// This is the only address form the FPU sees; how the offset was computed
/// (16-bit or 32-bit ModR/M forms) is invisible past this point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SegmentedAddr {
    /// Segment the offset is relative to.
    pub segment: SegmentReg,
    /// Offset within the segment.
    pub offset: u32,
}

impl SegmentedAddr {
    /// Creates a new segmented address.
    #[inline(always)]
    pub const fn new(segment: SegmentReg, offset: u32) -> Self {
        Self { segment, offset }
    }

    /// Returns the address `bytes` further into the same segment.
    ///
    /// The offset wraps at 32 bits; segment limit checks catch the overflow.
    #[inline(always)]
    pub const fn add(self, bytes: u32) -> Self {
        Self {
            segment: self.segment,
            offset: self.offset.wrapping_add(bytes),
        }
    }
}

impl fmt::Display for SegmentedAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:08X}", self.segment, self.offset)
    }
}

/// Addressing mode an instruction's ModR/M operand is decoded under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AddressSize {
    /// 16-bit addressing (`[BX+SI]` forms, 16-bit displacements, offsets wrap at 64 KiB).
    #[default]
    Addr16,
    /// 32-bit addressing (base/SIB forms, 32-bit displacements).
    Addr32,
}

impl AddressSize {
    /// Mask applied to a computed offset.
    #[inline(always)]
    pub const fn offset_mask(self) -> u32 {
        match self {
            Self::Addr16 => 0xFFFF,
            Self::Addr32 => 0xFFFF_FFFF,
        }
    }

    /// Returns the other address size, as selected by the `0x67` override prefix.
    #[inline(always)]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Addr16 => Self::Addr32,
            Self::Addr32 => Self::Addr16,
        }
    }
}
