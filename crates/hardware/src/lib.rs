//! Stack-based virtual CPU library.
//!
//! This crate implements a small word-addressed virtual machine with the following:
//! 1. **Core:** Five registers, a downward-growing stack, the fetch-decode-execute loop and 25 instructions.
//! 2. **Memory:** A flat `i32` image holding the program followed by a reserved stack region.
//! 3. **ISA:** The opcode table, operand layouts and a disassembler.
//! 4. **SoC:** The console device behind `IN`, `GET`, `OUT` and `PUT`.
//! 5. **Simulation:** Loader, configuration, and statistics collection.

/// Common types and constants (registers, status, errors).
pub mod common;
/// Machine configuration (defaults, JSON loading).
pub mod config;
/// CPU core (state, execution loop, instruction handlers, ALU).
pub mod core;
/// Instruction set (opcode table, disassembler).
pub mod isa;
/// Program loader.
pub mod sim;
/// System-on-chip (memory image, console devices, traits).
pub mod soc;
/// Execution statistics collection and reporting.
pub mod stats;

/// Execution status and per-operation error.
pub use crate::common::{CpuError, LoadError, Status};
/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Main CPU type; owns memory, registers, stack and console.
pub use crate::core::Cpu;
/// Memory image built by the loader.
pub use crate::soc::Memory;
