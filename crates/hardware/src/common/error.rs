//! Status and Error definitions.
//!
//! This module defines how the CPU reports the outcome of execution. It provides:
//! 1. **Status:** The closed set of machine states that gates further execution.
//! 2. **CPU Errors:** One error kind per failing operation, each mapping onto a `Status`.
//! 3. **Load Errors:** Failures while building the memory image from a byte stream.

use std::fmt;
use std::io;

use thiserror::Error;

/// Execution status of the CPU.
///
/// The status is the single authority on whether another instruction may be
/// executed: only [`Status::Ok`] allows stepping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Status {
    /// The CPU is ready to execute the next instruction.
    #[default]
    Ok,
    /// A `HALT` instruction was executed.
    Halted,
    /// The word at the instruction pointer is not a known opcode.
    IllegalInstruction,
    /// An operand (register index or character value) was out of range.
    IllegalOperand,
    /// `DIV` was executed with a zero divisor.
    DivByZero,
    /// Stack overflow, underflow, or an out-of-range `LOAD`/`STORE` slot.
    InvalidStackOperation,
    /// The instruction pointer or an operand address left the code region.
    InvalidAddress,
    /// Console input or output failed.
    IoError,
}

impl Status {
    /// Returns `true` for every status other than `Ok` and `Halted`.
    pub const fn is_fault(self) -> bool {
        !matches!(self, Self::Ok | Self::Halted)
    }

    /// Returns the upper-case name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Halted => "HALTED",
            Self::IllegalInstruction => "ILLEGAL_INSTRUCTION",
            Self::IllegalOperand => "ILLEGAL_OPERAND",
            Self::DivByZero => "DIV_BY_ZERO",
            Self::InvalidStackOperation => "INVALID_STACK_OPERATION",
            Self::InvalidAddress => "INVALID_ADDRESS",
            Self::IoError => "IO_ERROR",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reason a stack access was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StackFault {
    /// `PUSH` or `CALL` with every slot occupied.
    #[error("stack overflow")]
    Overflow,
    /// `POP` or `RET` on an empty stack.
    #[error("stack underflow")]
    Underflow,
    /// `LOAD`/`STORE` slot `D + offset` outside the occupied stack.
    #[error("slot {slot} outside stack of size {size}")]
    OutOfRange {
        /// Requested slot, counted from the top of the stack.
        slot: i64,
        /// Number of occupied slots at the time of the access.
        size: usize,
    },
}

/// Error returned by a failing CPU operation.
///
/// Each variant corresponds to exactly one [`Status`]; the CPU stores that
/// status when the error is raised so that later steps fail fast.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CpuError {
    /// Unknown opcode at `addr`.
    #[error("illegal instruction {opcode:#x} at {addr}")]
    IllegalInstruction {
        /// The offending word.
        opcode: i32,
        /// Address it was fetched from.
        addr: i32,
    },
    /// Register operand outside `0..=4`.
    #[error("illegal register operand {operand}")]
    IllegalOperand {
        /// The offending operand word.
        operand: i64,
    },
    /// `PUT` of a value that is not a byte.
    #[error("value {value} is not a printable byte")]
    IllegalCharacter {
        /// The register value.
        value: i32,
    },
    /// Division by zero.
    #[error("division by zero")]
    DivByZero,
    /// Rejected stack access.
    #[error("invalid stack operation: {0}")]
    InvalidStackOperation(StackFault),
    /// Instruction or operand fetch outside the permitted region.
    #[error("invalid address {addr}")]
    InvalidAddress {
        /// The address that was rejected.
        addr: i64,
    },
    /// Console failure or unparsable input.
    #[error("console I/O failed: {0:?}")]
    Io(io::ErrorKind),
    /// A step was requested while the status forbids execution.
    #[error("cpu is not running (status {0})")]
    NotRunning(Status),
}

impl CpuError {
    /// Returns the status this error leaves the CPU in.
    pub const fn status(&self) -> Status {
        match self {
            Self::IllegalInstruction { .. } => Status::IllegalInstruction,
            Self::IllegalOperand { .. } | Self::IllegalCharacter { .. } => Status::IllegalOperand,
            Self::DivByZero => Status::DivByZero,
            Self::InvalidStackOperation(_) => Status::InvalidStackOperation,
            Self::InvalidAddress { .. } => Status::InvalidAddress,
            Self::Io(_) => Status::IoError,
            Self::NotRunning(status) => *status,
        }
    }
}

impl From<io::Error> for CpuError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.kind())
    }
}

impl From<StackFault> for CpuError {
    fn from(fault: StackFault) -> Self {
        Self::InvalidStackOperation(fault)
    }
}

/// Error returned by the memory loader.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The byte source failed before end of stream.
    #[error("failed to read program: {0}")]
    Io(#[from] io::Error),
    /// The memory image could not be grown.
    #[error("failed to allocate {words} words of memory")]
    Allocation {
        /// Total number of words requested.
        words: usize,
    },
}
