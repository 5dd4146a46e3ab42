//! Global Machine Constants.
//!
//! This module defines machine-wide constants used across the CPU. It includes:
//! 1. **Word Constants:** Width of a memory word and the byte packing used by the loader.
//! 2. **Register Constants:** Size of the register file.
//! 3. **Allocation Constants:** Growth step of the memory image.
//! 4. **Execution Constants:** Defaults for stack capacity and step budgets.

/// Size of one memory word in bytes.
pub const WORD_SIZE: usize = 4;

/// Number of bits in one byte lane of a packed word.
pub const BYTE_BITS: u32 = 8;

/// Number of architectural registers (`A`, `B`, `C`, `D`, `RESULT`).
pub const NUM_REGISTERS: usize = 5;

/// Memory grows in blocks of this many words (one 4 KiB page).
pub const BLOCK_SIZE: usize = 4096 / WORD_SIZE;

/// Default number of stack slots reserved behind the program.
pub const DEFAULT_STACK_CAPACITY: usize = 256;

/// Default step budget for a single `run`.
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

/// Largest byte value `PUT` will print.
pub const MAX_CHAR_VALUE: i32 = 255;

/// Register value `GET` stores on end of input.
pub const END_OF_INPUT: i32 = -1;
