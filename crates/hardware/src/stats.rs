//! FPU statistics collection and reporting.
//!
//! This module tracks what the x87 load/store unit has done. It provides:
//! 1. **Timing:** The `CycleSink` trait handlers report per-instruction cycle costs through.
//! 2. **Instruction mix:** Loads, stores and pops retired.
//! 3. **Faults:** Memory accesses that aborted an instruction.

use std::fmt;

/// Receiver for the fixed cycle cost of each completed instruction.
///
/// The scheduler behind it is not modelled here; handlers only report.
pub trait CycleSink {
    /// Accounts `cycles` to the currently executing instruction.
    fn add_cycles(&mut self, cycles: u64);
}

/// A bare cycle counter.
impl CycleSink for u64 {
    fn add_cycles(&mut self, cycles: u64) {
        *self += cycles;
    }
}

/// Statistics for the x87 load/store unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FpuStats {
    /// Total cycles charged by completed instructions.
    pub cycles: u64,
    /// Instructions retired.
    pub instructions: u64,
    /// Loads retired (`FILD`, `FLD`).
    pub loads: u64,
    /// Stores retired (`FIST`, `FISTP`, `FST`, `FSTP`, `FBSTP`).
    pub stores: u64,
    /// Retired stores that also popped the stack.
    pub pops: u64,
    /// `FISTP m64` stores satisfied from an exact-int64 shadow.
    pub exact_int64_stores: u64,
    /// Instructions aborted by a memory fault.
    pub faults: u64,
}

impl CycleSink for FpuStats {
    fn add_cycles(&mut self, cycles: u64) {
        self.cycles += cycles;
    }
}

impl FpuStats {
    /// Creates zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Average cycles per retired instruction, or `0.0` before the first one.
    pub fn cpi(&self) -> f64 {
        if self.instructions == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions as f64
        }
    }
}

impl fmt::Display for FpuStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "X87 LOAD/STORE STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "fpu_cycles               {}", self.cycles)?;
        writeln!(f, "fpu_insts                {}", self.instructions)?;
        writeln!(f, "fpu_cpi                  {:.4}", self.cpi())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "  loads                  {}", self.loads)?;
        writeln!(f, "  stores                 {}", self.stores)?;
        writeln!(f, "  pops                   {}", self.pops)?;
        writeln!(f, "  exact_int64_stores     {}", self.exact_int64_stores)?;
        writeln!(f, "  faults                 {}", self.faults)
    }
}
