//! Core processor implementation.
//!
//! This module contains the CPU state, the x87 load/store unit and the
//! execution path that ties decode, addressing and the FPU together.

/// Architectural state (control word, register stack, general registers).
pub mod arch;

/// CPU core and x87 instruction execution.
pub mod cpu;

/// Execution units.
pub mod units;

pub use self::cpu::Cpu;
