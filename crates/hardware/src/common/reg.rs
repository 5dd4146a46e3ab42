//! Register File.
//!
//! This module provides the five architectural registers of the CPU. It provides:
//! 1. **Naming:** The `Register` enum for `A`, `B`, `C`, `D` and `RESULT`.
//! 2. **Decoding:** Conversion from raw operand words with range checking.
//! 3. **Storage:** The `RegisterFile` with typed and index-based access.

use std::fmt;

use super::constants::NUM_REGISTERS;
use super::error::CpuError;

/// Architectural register name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    /// Accumulator; target of `ADD`, `SUB`, `MUL` and `DIV`.
    A = 0,
    /// General purpose.
    B = 1,
    /// Loop counter for `LOOP`; cleared by `GET` on end of input.
    C = 2,
    /// Base for `LOAD`/`STORE` stack offsets.
    D = 3,
    /// Written by arithmetic and `CMP`; tested by conditional jumps.
    Result = 4,
}

impl Register {
    /// All registers in index order.
    pub const ALL: [Self; NUM_REGISTERS] = [Self::A, Self::B, Self::C, Self::D, Self::Result];

    /// Returns the register index (0-4).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the assembly name of the register.
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::Result => "RESULT",
        }
    }

    /// Looks up a register by index.
    pub const fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Self::A),
            1 => Some(Self::B),
            2 => Some(Self::C),
            3 => Some(Self::D),
            4 => Some(Self::Result),
            _ => None,
        }
    }
}

impl TryFrom<i32> for Register {
    type Error = CpuError;

    /// Decodes a register operand word.
    fn try_from(word: i32) -> Result<Self, Self::Error> {
        usize::try_from(word)
            .ok()
            .and_then(Self::from_index)
            .ok_or(CpuError::IllegalOperand {
                operand: i64::from(word),
            })
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The five-register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [i32; NUM_REGISTERS],
}

impl RegisterFile {
    /// Creates a register file with every register zeroed.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGISTERS],
        }
    }

    /// Reads a register.
    #[inline]
    pub const fn read(&self, reg: Register) -> i32 {
        self.regs[reg.index()]
    }

    /// Writes a register.
    #[inline]
    pub const fn write(&mut self, reg: Register, val: i32) {
        self.regs[reg.index()] = val;
    }

    /// Reads a register by raw index, `None` when the index is out of range.
    pub fn read_index(&self, idx: usize) -> Option<i32> {
        self.regs.get(idx).copied()
    }

    /// Exchanges two registers.
    pub fn swap(&mut self, a: Register, b: Register) {
        self.regs.swap(a.index(), b.index());
    }

    /// Zeroes every register.
    pub fn clear(&mut self) {
        self.regs = [0; NUM_REGISTERS];
    }

    /// Returns all register values in index order.
    pub const fn as_array(&self) -> &[i32; NUM_REGISTERS] {
        &self.regs
    }

    /// Writes the register values as one line.
    ///
    /// # Errors
    ///
    /// Propagates failures of the underlying writer.
    pub fn dump(&self, out: &mut dyn std::io::Write) -> std::io::Result<()> {
        for reg in Register::ALL {
            write!(out, "{:<6}= {:<11} ", reg.name(), self.read(reg))?;
        }
        writeln!(out)
    }
}
