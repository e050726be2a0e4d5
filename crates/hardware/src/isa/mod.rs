//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the x87 escape encodings and the decoding logic for the
//! memory-operand loads and stores.
//!
//! * `x87`: Escape bytes and ModR/M `/digit` values.
//! * `instruction`: Decoded operation and operand form.
//! * `decode`: Bytes to `X87Instruction`.
//! * `disasm`: `X87Instruction` to text.

/// Instruction decoding for x87 loads and stores.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Decoded instruction structures.
pub mod instruction;

/// x87 escape opcodes.
pub mod x87;
