//! Execution statistics collection and reporting.
//!
//! This module tracks what a program did while it ran. It provides:
//! 1. **Progress:** Steps attempted and instructions retired.
//! 2. **Instruction mix:** Counts by class (ALU, stack, branch, I/O, system).
//! 3. **Control flow:** Taken and not-taken branches.
//! 4. **Stack usage:** High-water mark of occupied stack slots.
//! 5. **Faults:** Number of steps that ended in an error.

use std::io::{self, Write};
use std::time::Instant;

use crate::isa::InstrClass;

/// Execution statistics of one CPU.
#[derive(Clone, Debug)]
pub struct ExecStats {
    start_time: Instant,
    /// Number of `step` calls that fetched an instruction.
    pub steps: u64,
    /// Number of instructions that completed successfully.
    pub instructions_retired: u64,

    /// ALU instructions retired.
    pub inst_alu: u64,
    /// Stack instructions retired.
    pub inst_stack: u64,
    /// Branch, call and return instructions retired.
    pub inst_branch: u64,
    /// I/O instructions retired.
    pub inst_io: u64,
    /// `NOP` and `HALT` retired.
    pub inst_system: u64,

    /// Conditional or unconditional transfers that changed the flow.
    pub branches_taken: u64,
    /// Conditional branches that fell through.
    pub branches_not_taken: u64,

    /// Highest number of simultaneously occupied stack slots.
    pub stack_high_water: usize,

    /// Steps that ended in a fault.
    pub faults: u64,
}

impl Default for ExecStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            steps: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_stack: 0,
            inst_branch: 0,
            inst_io: 0,
            inst_system: 0,
            branches_taken: 0,
            branches_not_taken: 0,
            stack_high_water: 0,
            faults: 0,
        }
    }
}

impl ExecStats {
    /// Records a retired instruction of the given class.
    pub const fn retire(&mut self, class: InstrClass) {
        self.instructions_retired += 1;
        match class {
            InstrClass::Alu => self.inst_alu += 1,
            InstrClass::Stack => self.inst_stack += 1,
            InstrClass::Branch => self.inst_branch += 1,
            InstrClass::Io => self.inst_io += 1,
            InstrClass::System => self.inst_system += 1,
        }
    }

    /// Records the outcome of a branch.
    pub const fn branch(&mut self, taken: bool) {
        if taken {
            self.branches_taken += 1;
        } else {
            self.branches_not_taken += 1;
        }
    }

    /// Updates the stack high-water mark.
    pub fn observe_stack(&mut self, size: usize) {
        self.stack_high_water = self.stack_high_water.max(size);
    }

    /// Writes a text report.
    ///
    /// # Errors
    ///
    /// Propagates failures of the writer.
    pub fn print(&self, out: &mut dyn Write) -> io::Result<()> {
        let seconds = self.start_time.elapsed().as_secs_f64();
        writeln!(out, "==========================================================")?;
        writeln!(out, "EXECUTION STATISTICS")?;
        writeln!(out, "==========================================================")?;
        writeln!(out, "host_seconds             {seconds:.4} s")?;
        writeln!(out, "steps                    {}", self.steps)?;
        writeln!(out, "insts_retired            {}", self.instructions_retired)?;
        writeln!(out, "faults                   {}", self.faults)?;
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "INSTRUCTION MIX")?;
        writeln!(out, "  alu                    {}", self.inst_alu)?;
        writeln!(out, "  stack                  {}", self.inst_stack)?;
        writeln!(out, "  branch                 {}", self.inst_branch)?;
        writeln!(out, "  io                     {}", self.inst_io)?;
        writeln!(out, "  system                 {}", self.inst_system)?;
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "branches_taken           {}", self.branches_taken)?;
        writeln!(out, "branches_not_taken       {}", self.branches_not_taken)?;
        writeln!(out, "stack_high_water         {}", self.stack_high_water)?;
        writeln!(out, "==========================================================")
    }
}
