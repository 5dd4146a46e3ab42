//! Main Execution Loop.
//!
//! This module implements the fetch-decode-execute cycle of the CPU. It performs the following:
//! 1. **Gating:** Refuses to step unless the status is `OK`.
//! 2. **Fetch:** Validates the instruction pointer against the code region.
//! 3. **Decode:** Maps the opcode word through the opcode table and reads its operands.
//! 4. **Execute:** Dispatches to the handler and applies the resulting control flow.
//! 5. **Observability:** Per-instruction tracing and statistics.

use tracing::{debug, trace};

use super::Cpu;
use crate::common::{CpuError, Status};
use crate::isa::Opcode;
use crate::isa::disasm::disassemble;

/// Control flow requested by an instruction handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Continue with the instruction after the operands.
    Next,
    /// Continue at the given address.
    Jump(i32),
    /// Stop; the instruction pointer stays on the halting instruction.
    Halt,
}

impl Cpu {
    /// Executes a single instruction.
    ///
    /// Operand words are consumed, and the instruction pointer advanced past
    /// them, before the handler validates them; a failing handler leaves the
    /// pointer on the last operand.
    ///
    /// # Errors
    ///
    /// Returns [`CpuError::NotRunning`] without touching any state if the
    /// status is not `OK`. Every other error is also stored as the status.
    pub fn step(&mut self) -> Result<(), CpuError> {
        if self.status != Status::Ok {
            return Err(CpuError::NotRunning(self.status));
        }

        let addr = self.inst_index;
        if addr < 0 || i64::from(addr) > self.end_of_code() {
            return Err(self.fault(CpuError::InvalidAddress {
                addr: i64::from(addr),
            }));
        }
        self.stats.steps += 1;

        let Some(word) = self.memory.read(addr as usize) else {
            return Err(self.fault(CpuError::InvalidAddress {
                addr: i64::from(addr),
            }));
        };
        let Some(op) = Opcode::decode(word) else {
            return Err(self.fault(CpuError::IllegalInstruction { opcode: word, addr }));
        };

        let operands = match self.fetch_operands(op, addr) {
            Ok(operands) => operands,
            Err(e) => return Err(self.fault(e)),
        };

        if self.trace {
            let (text, _) = disassemble(self.memory.words(), addr as usize);
            trace!(addr, inst = %text, regs = ?self.regs.as_array(), stack = self.stack_size, "exec");
        }

        self.inst_index = addr.wrapping_add(op.operand_count() as i32);
        match self.execute(op, operands) {
            Ok(Flow::Next) => self.inst_index = self.inst_index.wrapping_add(1),
            Ok(Flow::Jump(target)) => self.inst_index = target,
            Ok(Flow::Halt) => {
                self.status = Status::Halted;
                debug!(addr, "cpu halted");
            }
            Err(e) => return Err(self.fault(e)),
        }
        self.stats.retire(op.class());
        Ok(())
    }

    /// Executes up to `max_steps` instructions.
    ///
    /// Stops early when the CPU halts (the halting step is counted) or a
    /// step fails.
    ///
    /// # Returns
    ///
    /// The number of steps executed, or, if a step failed, the negated number
    /// of steps consumed including the failing one. Returns 0 without
    /// stepping if the status is not `OK`.
    pub fn run(&mut self, max_steps: u64) -> i64 {
        if self.status != Status::Ok {
            return 0;
        }
        let mut executed: i64 = 0;
        let mut failed = false;
        for _ in 0..max_steps {
            let result = self.step();
            if self.status == Status::Halted {
                executed += 1;
                break;
            }
            if result.is_err() {
                failed = true;
                break;
            }
            executed += 1;
        }
        if let Err(e) = self.console.flush() {
            debug!(error = %e, "console flush failed");
        }
        if failed { -(executed + 1) } else { executed }
    }
}
