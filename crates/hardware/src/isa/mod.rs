//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode table and the disassembler.
//!
//! # Encoding
//!
//! Every instruction is one opcode word followed by zero, one, or two operand
//! words. Words are 32-bit signed integers; there is no variable-length packing.

/// Instruction disassembler for debug tracing and listings.
pub mod disasm;

/// Opcode table, operand layouts, and consistency checks.
pub mod opcodes;

pub use opcodes::{InstrClass, MAX_OPERANDS, Opcode, OperandKind};
