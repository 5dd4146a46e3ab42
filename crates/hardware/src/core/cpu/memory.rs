//! Stack and Operand Access.
//!
//! This module implements the CPU's view of memory. It handles:
//! 1. **Operand Fetch:** Reading the words that follow an opcode, with bounds checks.
//! 2. **Stack Discipline:** Push and pop against the stack region at the end of memory.
//! 3. **Indexed Access:** `LOAD`/`STORE` slots addressed relative to the stack top.

use super::Cpu;
use crate::common::{CpuError, Register, StackFault};
use crate::isa::{MAX_OPERANDS, Opcode};

impl Cpu {
    /// Reads the operand words of `op`, located right after `addr`.
    ///
    /// With strict operand fetch, every operand must lie at or below
    /// `end_of_code`; otherwise it only has to lie inside the memory image.
    pub(super) fn fetch_operands(&self, op: Opcode, addr: i32) -> Result<[i32; MAX_OPERANDS], CpuError> {
        let limit = if self.strict_operand_fetch {
            self.end_of_code()
        } else {
            self.memory.len() as i64 - 1
        };
        let mut operands = [0; MAX_OPERANDS];
        for (i, slot) in operands.iter_mut().enumerate().take(op.operand_count()) {
            let at = i64::from(addr) + 1 + i as i64;
            if at > limit {
                return Err(CpuError::InvalidAddress { addr: at });
            }
            *slot = self
                .memory
                .read(at as usize)
                .ok_or(CpuError::InvalidAddress { addr: at })?;
        }
        Ok(operands)
    }

    /// Pushes a value onto the stack.
    pub(super) fn push(&mut self, val: i32) -> Result<(), CpuError> {
        if self.stack_size >= self.stack_capacity() {
            return Err(StackFault::Overflow.into());
        }
        self.memory.write_slot(self.stack_size, val);
        self.stack_size += 1;
        self.stats.observe_stack(self.stack_size);
        Ok(())
    }

    /// Pops the top of the stack, zeroing the vacated slot.
    pub(super) fn pop(&mut self) -> Result<i32, CpuError> {
        if self.stack_size == 0 {
            return Err(StackFault::Underflow.into());
        }
        self.stack_size -= 1;
        let val = self.memory.read_slot(self.stack_size);
        self.memory.write_slot(self.stack_size, 0);
        Ok(val)
    }

    /// Resolves `D + offset` to a logical stack slot.
    ///
    /// Depth 0 is the most recently pushed value; the depth must address an
    /// occupied slot.
    pub(super) fn indexed_slot(&self, offset: i32) -> Result<usize, CpuError> {
        let depth = i64::from(self.regs.read(Register::D)) + i64::from(offset);
        let size = self.stack_size;
        if depth < 0 || depth >= size as i64 {
            return Err(StackFault::OutOfRange { slot: depth, size }.into());
        }
        Ok(size - 1 - depth as usize)
    }

    /// Non-destructive read of the value `depth` slots below the top.
    pub fn peek_stack(&self, depth: usize) -> Option<i32> {
        (depth < self.stack_size).then(|| self.memory.read_slot(self.stack_size - 1 - depth))
    }

    /// Occupied stack slots, bottom first.
    pub fn stack(&self) -> Vec<i32> {
        (0..self.stack_size).map(|slot| self.memory.read_slot(slot)).collect()
    }
}
