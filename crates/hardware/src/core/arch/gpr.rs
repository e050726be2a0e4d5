//! IA-32 General-Purpose Register File.
//!
//! This module implements the eight 32-bit general-purpose registers. It performs the following:
//! 1. **Storage:** Maintains `EAX`-`EDI` in encoding order.
//! 2. **Sub-registers:** Exposes the low 16 bits used by 16-bit addressing.
//! 3. **Debugging:** Provides a register dump for trace output.

use std::fmt;

/// General-purpose register, numbered as in the ModR/M and SIB encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Reg {
    /// Accumulator.
    Eax = 0,
    /// Counter.
    Ecx = 1,
    /// Data.
    Edx = 2,
    /// Base.
    Ebx = 3,
    /// Stack pointer.
    Esp = 4,
    /// Frame pointer.
    Ebp = 5,
    /// Source index.
    Esi = 6,
    /// Destination index.
    Edi = 7,
}

impl Reg {
    /// All registers in encoding order.
    pub const ALL: [Self; 8] = [
        Self::Eax,
        Self::Ecx,
        Self::Edx,
        Self::Ebx,
        Self::Esp,
        Self::Ebp,
        Self::Esi,
        Self::Edi,
    ];

    /// Maps a 3-bit register field to a register.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0b111) as usize]
    }

    /// 32-bit register name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eax => "eax",
            Self::Ecx => "ecx",
            Self::Edx => "edx",
            Self::Ebx => "ebx",
            Self::Esp => "esp",
            Self::Ebp => "ebp",
            Self::Esi => "esi",
            Self::Edi => "edi",
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// General-Purpose Register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; 8],
}

impl Gpr {
    /// Creates a register file with all registers zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a full 32-bit register.
    #[inline]
    pub const fn read32(&self, reg: Reg) -> u32 {
        self.regs[reg as usize]
    }

    /// Reads the low 16 bits of a register.
    #[inline]
    pub const fn read16(&self, reg: Reg) -> u16 {
        self.regs[reg as usize] as u16
    }

    /// Writes a full 32-bit register.
    #[inline]
    pub fn write32(&mut self, reg: Reg, val: u32) {
        self.regs[reg as usize] = val;
    }

    /// Writes the low 16 bits of a register, preserving the upper half.
    #[inline]
    pub fn write16(&mut self, reg: Reg, val: u16) {
        let slot = &mut self.regs[reg as usize];
        *slot = (*slot & 0xFFFF_0000) | u32::from(val);
    }

    /// Dumps all registers, two per line, for fault trace output.
    pub fn dump(&self) -> String {
        Reg::ALL
            .chunks(2)
            .map(|pair| {
                pair.iter()
                    .map(|r| format!("{:<3}={:#010x}", r.name(), self.read32(*r)))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
