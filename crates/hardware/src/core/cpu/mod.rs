//! CPU Core Definition and Initialization.
//!
//! This module defines the `Cpu` structure that owns the state the x87
//! load/store path needs. It coordinates the following:
//! 1. **State Management:** General-purpose registers and the x87 register stack.
//! 2. **Addressing:** The code segment's default address size.
//! 3. **Observability:** The trace flag and FPU statistics.
//!
//! Memory is not owned by the CPU; each instruction borrows a `MemoryBus`.

/// Decode-and-execute of x87 loads and stores.
pub mod execution;

/// Effective address computation.
pub mod memory;

use crate::common::AddressSize;
use crate::config::Config;
use crate::core::arch::fcw::ControlWord;
use crate::core::arch::fpr::FpuState;
use crate::core::arch::gpr::Gpr;
use crate::stats::FpuStats;

/// Processor state for x87 load/store execution.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General-purpose registers.
    pub gpr: Gpr,
    /// x87 register stack and control word.
    pub fpu: FpuState,
    /// Address size used when no `0x67` prefix is present.
    pub default_address_size: AddressSize,
    /// Emit `tracing` events per instruction.
    pub trace: bool,
    /// Performance statistics.
    pub stats: FpuStats,
}

impl Cpu {
    /// Creates a CPU from configuration: registers zero, FPU in its `FINIT`
    /// state with the configured control word.
    pub fn new(config: &Config) -> Self {
        Self {
            gpr: Gpr::new(),
            fpu: FpuState::with_control_word(ControlWord(config.fpu.control_word)),
            default_address_size: AddressSize::default(),
            trace: config.general.trace,
            stats: FpuStats::new(),
        }
    }

    /// Sets the default address size (16-bit or 32-bit code segment).
    pub fn with_address_size(mut self, size: AddressSize) -> Self {
        self.default_address_size = size;
        self
    }

    /// Returns the CPU's statistics.
    pub fn stats(&self) -> &FpuStats {
        &self.stats
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
