//! Instruction Disassembler for x87 loads and stores.
//!
//! Renders a decoded `X87Instruction` as text for trace events and test
//! diagnostics. The operand is shown symbolically (registers, not their
//! values); a segment appears only when a prefix overrode the default.
//!
//! # Usage
//!
//! ```
//! use pcsim_core::common::AddressSize;
//! use pcsim_core::isa::decode::decode;
//! use pcsim_core::isa::disasm::disassemble;
//!
//! let inst = decode(&[0xDF, 0x40, 0x10], AddressSize::Addr16).unwrap();
//! assert_eq!(disassemble(&inst), "fild m16int [bx+si+0x10]");
//! ```

use std::fmt::Write;

use crate::common::AddressSize;
use crate::core::arch::gpr::Reg;
use crate::isa::instruction::X87Instruction;

/// 16-bit `rm` base/index combinations.
const RM16_NAMES: [&str; 8] = ["bx+si", "bx+di", "bp+si", "bp+di", "si", "di", "bp", "bx"];

/// Formats the register part of a 16-bit operand.
fn base16(inst: &X87Instruction) -> Option<&'static str> {
    if inst.modrm.mode == 0 && inst.modrm.rm == 0b110 {
        None
    } else {
        Some(RM16_NAMES[inst.modrm.rm as usize])
    }
}

/// Formats the register part of a 32-bit operand.
fn base32(inst: &X87Instruction) -> Option<String> {
    let modrm = inst.modrm;
    match inst.sib {
        Some(sib) => {
            let base_bits = sib & 0b111;
            let index_bits = (sib >> 3) & 0b111;
            let mut out = String::new();
            if !(modrm.mode == 0 && base_bits == 0b101) {
                out.push_str(Reg::from_bits(base_bits).name());
            }
            if index_bits != 0b100 {
                if !out.is_empty() {
                    out.push('+');
                }
                let _ = write!(out, "{}*{}", Reg::from_bits(index_bits), 1u8 << (sib >> 6));
            }
            (!out.is_empty()).then_some(out)
        }
        None if modrm.mode == 0 && modrm.rm == 0b101 => None,
        None => Some(Reg::from_bits(modrm.rm).name().to_owned()),
    }
}

/// Disassembles an x87 load/store, e.g. `"fstp m80fp es:[ebx+0x8]"`.
pub fn disassemble(inst: &X87Instruction) -> String {
    let base = match inst.address_size {
        AddressSize::Addr16 => base16(inst).map(str::to_owned),
        AddressSize::Addr32 => base32(inst),
    };

    let mut out = format!("{} ", inst.op);
    if let Some(seg) = inst.segment_override {
        let _ = write!(out, "{}:", seg.to_string().to_lowercase());
    }
    out.push('[');
    match (base, inst.disp) {
        (Some(regs), 0) => out.push_str(&regs),
        (Some(regs), d) if d < 0 => {
            let _ = write!(out, "{regs}-{:#x}", d.unsigned_abs());
        }
        (Some(regs), d) => {
            let _ = write!(out, "{regs}+{d:#x}");
        }
        (None, d) => {
            let mask = inst.address_size.offset_mask();
            let _ = write!(out, "{:#x}", (d as u32) & mask);
        }
    }
    out.push(']');
    out
}
