//! Core processor implementation.
//!
//! This module contains the CPU state machine (registers, stack, instruction
//! pointer, status), the fetch-decode-execute loop, the instruction handlers,
//! and the execution units they use.

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Execution units (ALU).
pub mod units;

pub use self::cpu::Cpu;
