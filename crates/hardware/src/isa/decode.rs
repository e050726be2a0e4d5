//! x87 Instruction Decoder.
//!
//! This module turns raw instruction bytes into an `X87Instruction`. It handles
//! segment-override and address-size prefixes, the escape byte, the ModR/M
//! byte, and the SIB byte and displacement the addressing form calls for.
//! Only the memory-operand load/store encodings are recognised.

use thiserror::Error;

use crate::common::{AddressSize, SegmentReg};
use crate::core::units::fpu::codec::{FistWidth, FstFormat, IntWidth, RealFormat};
use crate::isa::instruction::{ModRm, X87Instruction, X87Op};
use crate::isa::x87::opcodes;

/// `rm` value that selects a SIB byte under 32-bit addressing.
const RM_SIB: u8 = 0b100;

/// `rm` value that selects a bare displacement (`mod = 0`) under 32-bit addressing.
const RM32_DISP_ONLY: u8 = 0b101;

/// `rm` value that selects a bare displacement (`mod = 0`) under 16-bit addressing.
const RM16_DISP_ONLY: u8 = 0b110;

/// SIB base value that means "no base" when `mod = 0`.
const SIB_NO_BASE: u8 = 0b101;

/// Maximum number of prefix bytes accepted before the escape byte.
const MAX_PREFIXES: usize = 4;

/// Reasons a byte sequence is not a supported x87 load/store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The instruction ended before the decoder had all the bytes it needs.
    #[error("instruction truncated: needed {needed} bytes, have {available}")]
    Truncated {
        /// Bytes required so far.
        needed: usize,
        /// Bytes supplied.
        available: usize,
    },

    /// The opcode byte is not an x87 escape (`D8`-`DF`).
    #[error("opcode {0:#04x} is not an x87 escape")]
    NotX87(u8),

    /// The ModR/M byte names a register operand (`mod = 3`).
    #[error("{escape:#04x} {modrm:#04x} is a register-stack form")]
    RegisterForm {
        /// Escape byte.
        escape: u8,
        /// ModR/M byte.
        modrm: u8,
    },

    /// The escape/reg combination is not a load or store provided here.
    #[error("{escape:#04x} /{reg} is not a supported x87 load/store")]
    Unsupported {
        /// Escape byte.
        escape: u8,
        /// ModR/M reg field.
        reg: u8,
    },
}

/// Maps an escape byte and ModR/M byte to the load/store they encode.
///
/// # Examples
///
/// ```
/// use pcsim_core::core::units::fpu::codec::IntWidth;
/// use pcsim_core::isa::decode::decode_op;
/// use pcsim_core::isa::instruction::X87Op;
///
/// // DF /5 = FILD m64int
/// assert_eq!(decode_op(0xDF, 0b00_101_000), Ok(X87Op::Fild(IntWidth::W64)));
/// ```
pub fn decode_op(escape: u8, modrm: u8) -> Result<X87Op, DecodeError> {
    if !(opcodes::ESC_FIRST..=opcodes::ESC_LAST).contains(&escape) {
        return Err(DecodeError::NotX87(escape));
    }
    let fields = ModRm::from_byte(modrm);
    if !fields.is_memory() {
        return Err(DecodeError::RegisterForm { escape, modrm });
    }

    let op = match (escape, fields.reg) {
        (opcodes::ESC_D9, opcodes::REG_LOAD) => X87Op::Fld(RealFormat::Single),
        (opcodes::ESC_D9, opcodes::REG_STORE) => X87Op::Fst(FstFormat::Single),
        (opcodes::ESC_D9, opcodes::REG_STORE_POP) => X87Op::Fstp(RealFormat::Single),

        (opcodes::ESC_DB, opcodes::REG_LOAD) => X87Op::Fild(IntWidth::W32),
        (opcodes::ESC_DB, opcodes::REG_STORE) => X87Op::Fist(FistWidth::W32),
        (opcodes::ESC_DB, opcodes::REG_STORE_POP) => X87Op::Fistp(IntWidth::W32),
        (opcodes::ESC_DB, opcodes::REG_LOAD_WIDE) => X87Op::Fld(RealFormat::Extended),
        (opcodes::ESC_DB, opcodes::REG_STORE_POP_WIDE) => X87Op::Fstp(RealFormat::Extended),

        (opcodes::ESC_DD, opcodes::REG_LOAD) => X87Op::Fld(RealFormat::Double),
        (opcodes::ESC_DD, opcodes::REG_STORE) => X87Op::Fst(FstFormat::Double),
        (opcodes::ESC_DD, opcodes::REG_STORE_POP) => X87Op::Fstp(RealFormat::Double),

        (opcodes::ESC_DF, opcodes::REG_LOAD) => X87Op::Fild(IntWidth::W16),
        (opcodes::ESC_DF, opcodes::REG_STORE) => X87Op::Fist(FistWidth::W16),
        (opcodes::ESC_DF, opcodes::REG_STORE_POP) => X87Op::Fistp(IntWidth::W16),
        (opcodes::ESC_DF, opcodes::REG_LOAD_WIDE) => X87Op::Fild(IntWidth::W64),
        (opcodes::ESC_DF, opcodes::REG_BCD_STORE_POP) => X87Op::Fbstp,
        (opcodes::ESC_DF, opcodes::REG_STORE_POP_WIDE) => X87Op::Fistp(IntWidth::W64),

        (escape, reg) => return Err(DecodeError::Unsupported { escape, reg }),
    };
    Ok(op)
}

/// Cursor over the instruction bytes.
struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let end = self.pos + N;
        let Some(slice) = self.bytes.get(self.pos..end) else {
            return Err(DecodeError::Truncated {
                needed: end,
                available: self.bytes.len(),
            });
        };
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        self.pos = end;
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        self.take::<1>().map(|b| b[0])
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }
}

/// Displacement width an addressing form carries.
#[derive(Clone, Copy)]
enum Disp {
    None,
    Byte,
    Word,
    Dword,
}

/// Decodes one x87 load/store starting at `bytes[0]`.
///
/// `default_size` is the code segment's addressing mode; a `0x67` prefix
/// selects the other one.
pub fn decode(bytes: &[u8], default_size: AddressSize) -> Result<X87Instruction, DecodeError> {
    let mut reader = ByteReader::new(bytes);
    let mut address_size = default_size;
    let mut segment_override = None;

    for _ in 0..MAX_PREFIXES {
        match reader.peek() {
            Some(opcodes::PREFIX_ADDRESS_SIZE) => {
                address_size = default_size.toggled();
                let _ = reader.u8()?;
            }
            Some(byte) => match SegmentReg::from_prefix(byte) {
                Some(seg) => {
                    segment_override = Some(seg);
                    let _ = reader.u8()?;
                }
                None => break,
            },
            None => break,
        }
    }

    let escape = reader.u8()?;
    if !(opcodes::ESC_FIRST..=opcodes::ESC_LAST).contains(&escape) {
        return Err(DecodeError::NotX87(escape));
    }
    let modrm_byte = reader.u8()?;
    let op = decode_op(escape, modrm_byte)?;
    let modrm = ModRm::from_byte(modrm_byte);

    let mut sib = None;
    let disp_kind = match address_size {
        AddressSize::Addr16 => match modrm.mode {
            0 if modrm.rm == RM16_DISP_ONLY => Disp::Word,
            0 => Disp::None,
            1 => Disp::Byte,
            _ => Disp::Word,
        },
        AddressSize::Addr32 => {
            let mut no_base = modrm.mode == 0 && modrm.rm == RM32_DISP_ONLY;
            if modrm.rm == RM_SIB {
                let sib_byte = reader.u8()?;
                no_base = modrm.mode == 0 && (sib_byte & 0b111) == SIB_NO_BASE;
                sib = Some(sib_byte);
            }
            match modrm.mode {
                0 if no_base => Disp::Dword,
                0 => Disp::None,
                1 => Disp::Byte,
                _ => Disp::Dword,
            }
        }
    };

    let disp = match disp_kind {
        Disp::None => 0,
        Disp::Byte => i32::from(reader.u8()? as i8),
        Disp::Word => i32::from(i16::from_le_bytes(reader.take::<2>()?)),
        Disp::Dword => i32::from_le_bytes(reader.take::<4>()?),
    };

    Ok(X87Instruction {
        op,
        modrm,
        sib,
        disp,
        address_size,
        segment_override,
        len: reader.pos,
    })
}
