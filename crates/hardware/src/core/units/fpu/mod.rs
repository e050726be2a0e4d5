//! x87 Load/Store Unit.
//!
//! This module executes the x87 memory-operand loads and stores. It performs the following:
//! 1. **Loads:** `FILD` and `FLD` read the operand, convert it and push it.
//! 2. **Stores:** `FIST`/`FISTP`, `FST`/`FSTP` and `FBSTP` convert `ST(0)` and write it.
//! 3. **Timing:** The fixed cycle cost of each completed instruction goes to a `CycleSink`.
//!
//! A memory fault aborts the instruction with the register stack exactly as it
//! was: loads read before pushing and stores pop only after a successful write.
//! Ten-byte stores check the whole operand before the first byte is written.
//!
//! Format conversions live in the submodules:
//! - [`codec`]: integer, single and double operands.
//! - [`extended`]: the 80-bit double-extended format.
//! - [`bcd`]: packed BCD for `FBSTP`.
//! - [`rounding_modes`]: control-word driven real-to-integer rounding.

/// Packed BCD encoding.
pub mod bcd;

/// Integer, single and double operand conversions.
pub mod codec;

/// Double-extended (`m80fp`) conversion.
pub mod extended;

/// Rounding control and the `RoundToInteger` trait.
pub mod rounding_modes;

use std::fmt;

use tracing::trace;

use self::bcd::{BCD_BYTES, encode_packed_bcd};
use self::codec::{IntWidth, RealFormat};
use self::rounding_modes::RoundToInteger;
use crate::common::{AccessType, MemResult, SegmentedAddr};
use crate::core::arch::fpr::FpuState;
use crate::isa::instruction::X87Op;
use crate::soc::traits::MemoryBus;
use crate::stats::CycleSink;

/// Offset of the sign/exponent word inside an `m80fp` operand.
const F80_EXPONENT_OFFSET: u32 = 8;

/// Result of a completed load or store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Retired {
    /// Cycles charged.
    pub cycles: u64,
    /// The instruction popped the stack.
    pub popped: bool,
    /// A `FISTP m64` wrote the exact integer shadow instead of a rounded value.
    pub exact_int64: bool,
}

/// Executes x87 loads and stores against a register stack and a memory bus.
///
/// Borrowed for the duration of a single instruction.
pub struct Fpu<'a, B: MemoryBus + ?Sized, T: CycleSink + ?Sized> {
    state: &'a mut FpuState,
    bus: &'a mut B,
    timing: &'a mut T,
    trace: bool,
}

impl<B: MemoryBus + ?Sized, T: CycleSink + ?Sized> fmt::Debug for Fpu<'_, B, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fpu")
            .field("state", &self.state)
            .field("trace", &self.trace)
            .finish_non_exhaustive()
    }
}

impl<'a, B: MemoryBus + ?Sized, T: CycleSink + ?Sized> Fpu<'a, B, T> {
    /// Binds the register stack, the memory it loads from and the timing sink.
    pub fn new(state: &'a mut FpuState, bus: &'a mut B, timing: &'a mut T) -> Self {
        Self {
            state,
            bus,
            timing,
            trace: false,
        }
    }

    /// Enables per-instruction `tracing` events.
    pub fn traced(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Executes `op` with its memory operand at `addr`.
    ///
    /// On success the instruction's cycle cost has been charged. On a fault
    /// nothing is charged and the register stack is untouched.
    pub fn execute(&mut self, op: X87Op, addr: SegmentedAddr) -> MemResult<Retired> {
        let exact_int64 = match op {
            X87Op::Fild(width) => {
                self.load_int(width, addr)?;
                false
            }
            X87Op::Fist(width) => self.store_int(width.widen(), addr, false)?,
            X87Op::Fistp(width) => self.store_int(width, addr, true)?,
            X87Op::Fld(format) => {
                self.load_real(format, addr)?;
                false
            }
            X87Op::Fst(format) => {
                self.store_real(format.widen(), addr, false)?;
                false
            }
            X87Op::Fstp(format) => {
                self.store_real(format, addr, true)?;
                false
            }
            X87Op::Fbstp => {
                self.store_bcd_pop(addr)?;
                false
            }
        };

        let cycles = op.cycles();
        if cycles != 0 {
            self.timing.add_cycles(cycles);
        }
        Ok(Retired {
            cycles,
            popped: op.pops(),
            exact_int64,
        })
    }

    /// `FILD`: reads a signed integer, pushes it as a real.
    ///
    /// A 64-bit operand is also kept verbatim beside the new `ST(0)` so that a
    /// later `FISTP m64` can reproduce it.
    pub fn load_int(&mut self, width: IntWidth, addr: SegmentedAddr) -> MemResult<()> {
        let raw = match width {
            IntWidth::W16 => u64::from(self.bus.read_u16(addr)?),
            IntWidth::W32 => u64::from(self.bus.read_u32(addr)?),
            IntWidth::W64 => self.bus.read_u64(addr)?,
        };
        let value = codec::decode_int(width, raw);
        self.state.push(value);
        if width == IntWidth::W64 {
            self.state.set_shadow_int64(0, raw as i64);
        }

        if self.trace {
            trace!(op = "fild", %width, %addr, raw = format_args!("{raw:#x}"), value, top = self.state.top());
        }
        Ok(())
    }

    /// `FIST`/`FISTP`: rounds `ST(0)` with the control word's RC field and writes it.
    ///
    /// Returns `true` if an exact-int64 shadow was written.
    pub fn store_int(&mut self, width: IntWidth, addr: SegmentedAddr, pop: bool) -> MemResult<bool> {
        let rounding = self.state.rounding_control();
        self.store_int_with(&rounding, width, addr, pop)
    }

    /// Integer store with a caller-supplied rounding policy.
    pub fn store_int_with<R: RoundToInteger + ?Sized>(
        &mut self,
        rounding: &R,
        width: IntWidth,
        addr: SegmentedAddr,
        pop: bool,
    ) -> MemResult<bool> {
        let value = self.state.read(0);
        let shadow = match width {
            IntWidth::W64 => self.state.shadow_int64(0),
            IntWidth::W16 | IntWidth::W32 => None,
        };
        let rounded = shadow.unwrap_or_else(|| rounding.round_to_integer(value));
        let raw = codec::encode_int(width, rounded);

        match width {
            IntWidth::W16 => self.bus.write_u16(addr, raw as u16)?,
            IntWidth::W32 => self.bus.write_u32(addr, raw as u32)?,
            IntWidth::W64 => self.bus.write_u64(addr, raw)?,
        }

        if self.trace {
            trace!(
                op = if pop { "fistp" } else { "fist" },
                %width,
                %addr,
                value,
                raw = format_args!("{raw:#x}"),
                exact = shadow.is_some()
            );
        }
        if pop {
            self.state.pop();
        }
        Ok(shadow.is_some())
    }

    /// `FLD`: reads a real operand and pushes it.
    pub fn load_real(&mut self, format: RealFormat, addr: SegmentedAddr) -> MemResult<()> {
        let value = match format {
            RealFormat::Single => codec::decode_f32(self.bus.read_u32(addr)?),
            RealFormat::Double => codec::decode_f64(self.bus.read_u64(addr)?),
            RealFormat::Extended => {
                let significand = self.bus.read_u64(addr)?;
                let sign_exponent = self.bus.read_u16(addr.add(F80_EXPONENT_OFFSET))?;
                extended::Float80 {
                    significand,
                    sign_exponent,
                }
                .to_f64()
            }
        };
        self.state.push(value);

        if self.trace {
            trace!(op = "fld", %format, %addr, value, top = self.state.top());
        }
        Ok(())
    }

    /// `FST`/`FSTP`: converts `ST(0)` to `format` and writes it.
    pub fn store_real(&mut self, format: RealFormat, addr: SegmentedAddr, pop: bool) -> MemResult<()> {
        let value = self.state.read(0);
        match format {
            RealFormat::Single => self.bus.write_u32(addr, codec::encode_f32(value))?,
            RealFormat::Double => self.bus.write_u64(addr, codec::encode_f64(value))?,
            RealFormat::Extended => {
                self.bus
                    .check_access(addr, format.bytes(), AccessType::Write)?;
                let f80 = extended::Float80::from_f64(value);
                self.bus.write_u64(addr, f80.significand)?;
                self.bus
                    .write_u16(addr.add(F80_EXPONENT_OFFSET), f80.sign_exponent)?;
            }
        }

        if self.trace {
            trace!(op = if pop { "fstp" } else { "fst" }, %format, %addr, value);
        }
        if pop {
            self.state.pop();
        }
        Ok(())
    }

    /// `FBSTP`: writes `ST(0)` as packed BCD and pops.
    pub fn store_bcd_pop(&mut self, addr: SegmentedAddr) -> MemResult<()> {
        self.bus
            .check_access(addr, BCD_BYTES as u32, AccessType::Write)?;
        let value = self.state.read(0);
        let bytes = encode_packed_bcd(value);
        for (offset, byte) in (0u32..).zip(bytes) {
            self.bus.write_u8(addr.add(offset), byte)?;
        }

        if self.trace {
            trace!(op = "fbstp", %addr, value, bcd = ?bytes);
        }
        self.state.pop();
        Ok(())
    }
}
