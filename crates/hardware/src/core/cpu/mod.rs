//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which owns the entire
//! machine state. It coordinates the following:
//! 1. **State Management:** Registers, instruction pointer, and execution status.
//! 2. **Memory Ownership:** The memory image with its code and stack regions.
//! 3. **Device Integration:** The console used by the I/O instructions.
//! 4. **Lifecycle:** Construction, reset, restart, and destruction.

/// Fetch-decode-execute loop (`step`, `run`).
pub mod execution;

/// Instruction handlers.
pub mod instructions;

/// Stack and operand memory access.
pub mod memory;

use std::fmt;
use std::io::{self, Write};

use tracing::debug;

use crate::common::{CpuError, Register, RegisterFile, Status};
use crate::config::Config;
use crate::soc::devices::StdConsole;
use crate::soc::{Console, Memory};
use crate::stats::ExecStats;

/// Main CPU structure containing all machine state.
pub struct Cpu {
    /// Code followed by the stack region.
    memory: Memory,
    /// Architectural registers.
    regs: RegisterFile,
    /// Address of the next instruction to fetch.
    inst_index: i32,
    /// Number of occupied stack slots.
    stack_size: usize,
    /// Execution gate; only `Ok` allows stepping.
    status: Status,
    /// Reject operand words outside the code region.
    strict_operand_fetch: bool,
    /// Log every executed instruction.
    trace: bool,
    /// Console for `IN`, `GET`, `OUT` and `PUT`.
    console: Box<dyn Console>,
    /// Execution statistics.
    stats: ExecStats,
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("inst_index", &self.inst_index)
            .field("status", &self.status)
            .field("regs", &self.regs)
            .field("stack_size", &self.stack_size)
            .field("end_of_code", &self.end_of_code())
            .field("memory_size", &self.memory_size())
            .finish_non_exhaustive()
    }
}

impl Cpu {
    /// Creates a CPU over `memory` attached to the process stdin and stdout,
    /// using the default configuration.
    pub fn new(memory: Memory) -> Self {
        Self::with_console(memory, Box::new(StdConsole::stdio()), &Config::default())
    }

    /// Creates a CPU over `memory` with an explicit console and configuration.
    ///
    /// # Arguments
    ///
    /// * `memory` - Memory image from the loader; its stack capacity fixes the stack size.
    /// * `console` - Device used by the I/O instructions.
    /// * `config` - Tracing and operand fetch policy.
    pub fn with_console(memory: Memory, console: Box<dyn Console>, config: &Config) -> Self {
        debug!(
            end_of_code = memory.end_of_code(),
            memory_size = memory.len(),
            stack_capacity = memory.stack_capacity(),
            "cpu created"
        );
        Self {
            memory,
            regs: RegisterFile::new(),
            inst_index: 0,
            stack_size: 0,
            status: Status::Ok,
            strict_operand_fetch: config.execution.strict_operand_fetch,
            trace: config.general.trace_instructions,
            console,
            stats: ExecStats::default(),
        }
    }

    /// Current execution status.
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Address of the next instruction to fetch.
    pub const fn inst_index(&self) -> i32 {
        self.inst_index
    }

    /// Moves the instruction pointer. The address is validated on the next fetch.
    pub const fn set_inst_index(&mut self, addr: i32) {
        self.inst_index = addr;
    }

    /// Number of occupied stack slots.
    pub const fn stack_size(&self) -> usize {
        self.stack_size
    }

    /// Maximum number of stack slots.
    pub const fn stack_capacity(&self) -> usize {
        self.memory.stack_capacity()
    }

    /// Highest valid instruction address; `-1` when there is no code.
    pub const fn end_of_code(&self) -> i64 {
        self.memory.end_of_code()
    }

    /// Memory size in words.
    pub fn memory_size(&self) -> usize {
        self.memory.len()
    }

    /// The memory image.
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// The register file.
    pub const fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Execution statistics.
    pub const fn stats(&self) -> &ExecStats {
        &self.stats
    }

    /// Enables or disables per-instruction tracing.
    pub const fn set_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    /// Reads a register.
    pub const fn reg(&self, reg: Register) -> i32 {
        self.regs.read(reg)
    }

    /// Writes a register.
    pub const fn set_reg(&mut self, reg: Register, val: i32) {
        self.regs.write(reg, val);
    }

    /// Reads a register by index.
    ///
    /// # Errors
    ///
    /// Returns [`CpuError::IllegalOperand`] and sets the status to
    /// `ILLEGAL_OPERAND` if `idx` is not in `0..=4`.
    pub fn get_register(&mut self, idx: usize) -> Result<i32, CpuError> {
        match self.regs.read_index(idx) {
            Some(val) => Ok(val),
            None => Err(self.fault(Self::bad_index(idx))),
        }
    }

    /// Writes a register by index.
    ///
    /// # Errors
    ///
    /// Returns [`CpuError::IllegalOperand`] and sets the status to
    /// `ILLEGAL_OPERAND` if `idx` is not in `0..=4`; nothing is written.
    pub fn set_register(&mut self, idx: usize, val: i32) -> Result<(), CpuError> {
        match Register::from_index(idx) {
            Some(reg) => {
                self.regs.write(reg, val);
                Ok(())
            }
            None => Err(self.fault(Self::bad_index(idx))),
        }
    }

    fn bad_index(idx: usize) -> CpuError {
        CpuError::IllegalOperand {
            operand: i64::try_from(idx).unwrap_or(i64::MAX),
        }
    }

    /// Clears registers, stack contents and stack size, and returns the
    /// status to `OK`. Code and the instruction pointer are untouched.
    pub fn reset(&mut self) {
        self.regs.clear();
        self.memory.clear_stack();
        self.stack_size = 0;
        self.status = Status::Ok;
        debug!(inst_index = self.inst_index, "cpu reset");
    }

    /// Resets the CPU, rewinds the instruction pointer to 0 and clears the statistics.
    pub fn restart(&mut self) {
        self.reset();
        self.inst_index = 0;
        self.stats = ExecStats::default();
    }

    /// Zeroes and releases the memory image. The CPU cannot be used afterwards.
    pub fn destroy(self) {
        debug!(memory_size = self.memory.len(), "cpu destroyed");
        let Self { memory, .. } = self;
        memory.wipe();
    }

    /// Records `err` as the CPU status and hands it back for propagation.
    pub(crate) fn fault(&mut self, err: CpuError) -> CpuError {
        if !matches!(err, CpuError::NotRunning(_)) {
            self.status = err.status();
            self.stats.faults += 1;
            debug!(status = %self.status, inst_index = self.inst_index, error = %err, "cpu fault");
        }
        err
    }

    /// Writes instruction pointer, status, registers and occupied stack slots.
    ///
    /// # Errors
    ///
    /// Propagates failures of the writer.
    pub fn dump_state(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "IP = {:<6} STATUS = {:<24} STACK = {}/{}",
            self.inst_index,
            self.status,
            self.stack_size,
            self.stack_capacity()
        )?;
        self.regs.dump(out)?;
        for depth in 0..self.stack_size {
            writeln!(out, "  [{depth:>4}] {}", self.memory.read_slot(self.stack_size - 1 - depth))?;
        }
        Ok(())
    }
}
