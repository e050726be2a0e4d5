//! Effective Address Computation.
//!
//! This module turns a decoded ModR/M memory operand into a segmented address.
//! It performs the following:
//! 1. **16-bit Addressing:** `BX`/`BP` + `SI`/`DI` combinations with 8/16-bit displacements.
//! 2. **32-bit Addressing:** Base register, scaled SIB index and 8/32-bit displacements.
//! 3. **Segment Selection:** `SS` for frame/stack-pointer bases, `DS` otherwise, unless a
//!    segment prefix overrides it.
//!
//! The two addressing modes are the only thing that differs between the 16-
//! and 32-bit forms of an x87 load or store, so the FPU handlers are given a
//! resolved address and never see the mode.

use super::Cpu;
use crate::common::{AddressSize, SegmentReg, SegmentedAddr};
use crate::core::arch::gpr::{Gpr, Reg};
use crate::isa::instruction::X87Instruction;

/// Computes the operand address of an instruction from the register file.
pub type AddressResolver = fn(&Gpr, &X87Instruction) -> SegmentedAddr;

/// SIB index value meaning "no index".
const SIB_NO_INDEX: u8 = 0b100;

/// Returns the resolver for an addressing mode.
pub const fn resolver_for(size: AddressSize) -> AddressResolver {
    match size {
        AddressSize::Addr16 => resolve16,
        AddressSize::Addr32 => resolve32,
    }
}

/// 16-bit ModR/M addressing.
pub fn resolve16(gpr: &Gpr, inst: &X87Instruction) -> SegmentedAddr {
    let modrm = inst.modrm;
    let bx = gpr.read16(Reg::Ebx);
    let bp = gpr.read16(Reg::Ebp);
    let si = gpr.read16(Reg::Esi);
    let di = gpr.read16(Reg::Edi);

    let (base, segment) = match modrm.rm {
        0 => (bx.wrapping_add(si), SegmentReg::Ds),
        1 => (bx.wrapping_add(di), SegmentReg::Ds),
        2 => (bp.wrapping_add(si), SegmentReg::Ss),
        3 => (bp.wrapping_add(di), SegmentReg::Ss),
        4 => (si, SegmentReg::Ds),
        5 => (di, SegmentReg::Ds),
        6 if modrm.mode == 0 => (0, SegmentReg::Ds),
        6 => (bp, SegmentReg::Ss),
        _ => (bx, SegmentReg::Ds),
    };

    let offset = u32::from(base).wrapping_add(inst.disp as u32) & AddressSize::Addr16.offset_mask();
    SegmentedAddr::new(inst.segment_override.unwrap_or(segment), offset)
}

/// 32-bit ModR/M and SIB addressing.
pub fn resolve32(gpr: &Gpr, inst: &X87Instruction) -> SegmentedAddr {
    let modrm = inst.modrm;

    let (base, index) = match inst.sib {
        Some(sib) => {
            let scale = sib >> 6;
            let index_reg = (sib >> 3) & 0b111;
            let base_reg = sib & 0b111;
            let base = if modrm.mode == 0 && base_reg == 0b101 {
                None
            } else {
                Some(Reg::from_bits(base_reg))
            };
            let index = (index_reg != SIB_NO_INDEX)
                .then(|| gpr.read32(Reg::from_bits(index_reg)) << scale);
            (base, index.unwrap_or(0))
        }
        None if modrm.mode == 0 && modrm.rm == 0b101 => (None, 0),
        None => (Some(Reg::from_bits(modrm.rm)), 0),
    };

    let segment = match base {
        Some(Reg::Ebp | Reg::Esp) => SegmentReg::Ss,
        _ => SegmentReg::Ds,
    };
    let offset = base
        .map_or(0, |r| gpr.read32(r))
        .wrapping_add(index)
        .wrapping_add(inst.disp as u32);
    SegmentedAddr::new(inst.segment_override.unwrap_or(segment), offset)
}

impl Cpu {
    /// Resolves the memory operand of `inst` against the current registers.
    pub fn effective_address(&self, inst: &X87Instruction) -> SegmentedAddr {
        resolver_for(inst.address_size)(&self.gpr, inst)
    }
}
