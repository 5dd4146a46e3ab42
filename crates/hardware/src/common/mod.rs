//! Common utilities and types used throughout the virtual CPU.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the machine. It includes:
//! 1. **Constants:** Word size, register count, and allocation block size.
//! 2. **Error Handling:** The execution `Status`, per-operation `CpuError`, and `LoadError`.
//! 3. **Register Management:** Register names and the five-register file.

/// Common constants used throughout the machine.
pub mod constants;

/// Status, error types, and stack fault reasons.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{BLOCK_SIZE, NUM_REGISTERS, WORD_SIZE};
pub use error::{CpuError, LoadError, StackFault, Status};
pub use reg::{Register, RegisterFile};
