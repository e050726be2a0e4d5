//! x87 Instruction Execution.
//!
//! This module runs one x87 load or store on the CPU. It performs the following:
//! 1. **Decode:** Prefixes, escape, ModR/M, SIB and displacement.
//! 2. **Address:** Effective address under the instruction's address size.
//! 3. **Execute:** Dispatch to the FPU load/store unit.
//! 4. **Accounting:** Instruction mix, cycles and faults in `FpuStats`.

use thiserror::Error;
use tracing::debug;

use super::Cpu;
use crate::common::MemoryFault;
use crate::core::units::fpu::{Fpu, Retired};
use crate::isa::decode::{DecodeError, decode};
use crate::isa::disasm::disassemble;
use crate::isa::instruction::X87Instruction;
use crate::soc::traits::MemoryBus;

/// Why an x87 instruction did not retire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ExecError {
    /// The bytes are not a supported x87 load/store.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    /// A memory access faulted; FPU state is unchanged.
    #[error("memory fault: {0}")]
    Fault(#[from] MemoryFault),
}

/// A retired instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Encoded length, so the caller can advance the instruction pointer.
    pub len: usize,
    /// What the FPU did.
    pub retired: Retired,
}

impl Cpu {
    /// Decodes and executes the x87 load/store at the start of `bytes`.
    pub fn execute_x87<B: MemoryBus + ?Sized>(
        &mut self,
        bus: &mut B,
        bytes: &[u8],
    ) -> Result<ExecOutcome, ExecError> {
        let inst = decode(bytes, self.default_address_size).inspect_err(|e| {
            if self.trace {
                debug!(error = %e, "x87 decode failed");
            }
        })?;
        let retired = self.execute_decoded(bus, &inst)?;
        Ok(ExecOutcome {
            len: inst.len,
            retired,
        })
    }

    /// Executes an already decoded instruction.
    pub fn execute_decoded<B: MemoryBus + ?Sized>(
        &mut self,
        bus: &mut B,
        inst: &X87Instruction,
    ) -> Result<Retired, MemoryFault> {
        let addr = self.effective_address(inst);
        let trace = self.trace;

        let result = Fpu::new(&mut self.fpu, bus, &mut self.stats)
            .traced(trace)
            .execute(inst.op, addr);

        match result {
            Ok(retired) => {
                self.stats.instructions += 1;
                if inst.op.is_load() {
                    self.stats.loads += 1;
                } else {
                    self.stats.stores += 1;
                }
                if retired.popped {
                    self.stats.pops += 1;
                }
                if retired.exact_int64 {
                    self.stats.exact_int64_stores += 1;
                }
                Ok(retired)
            }
            Err(fault) => {
                self.stats.faults += 1;
                if self.trace {
                    debug!(
                        inst = %disassemble(inst),
                        %addr,
                        %fault,
                        gpr = %self.gpr.dump(),
                        "x87 instruction faulted"
                    );
                }
                Err(fault)
            }
        }
    }
}
