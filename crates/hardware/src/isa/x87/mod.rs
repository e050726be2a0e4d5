//! x87 Floating-Point Escape Opcodes.
//!
//! Defines the escape bytes (`D8`-`DF`) and ModR/M `reg` field values that
//! select the memory-operand load/store instructions.
//!
//! # Structure
//!
//! - `opcodes`: Escape bytes and `/digit` reg-field encodings.

/// Escape bytes and reg-field encodings for x87 loads and stores.
pub mod opcodes;
