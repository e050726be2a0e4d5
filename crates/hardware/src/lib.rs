//! x87 FPU load/store core for an IA-32 PC emulator.
//!
//! This crate implements the x87 memory-operand loads and stores with the following:
//! 1. **Core:** The eight-slot register stack with tags, `TOP` and the exact-int64 shadow.
//! 2. **Codec:** Integer, single, double, double-extended and packed BCD operand formats.
//! 3. **ISA:** Decoding and disassembly of the `D9`/`DB`/`DD`/`DF` memory forms.
//! 4. **SoC:** A `MemoryBus` trait and a segmented, limit-checked RAM.
//! 5. **Simulation:** Configuration and statistics collection.

/// Common types (segmented addresses, access types, memory faults).
pub mod common;
/// Emulator configuration (defaults, hierarchical config structures).
pub mod config;
/// CPU core (arch state, execution, x87 load/store unit).
pub mod core;
/// Instruction set (x87 opcodes, instruction, decode, disasm).
pub mod isa;
/// System-on-chip (memory bus, segmented memory).
pub mod soc;
/// FPU statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds registers, the x87 stack and stats.
pub use crate::core::Cpu;
/// Flat RAM behind per-segment base/limit descriptors.
pub use crate::soc::SegmentedMemory;
