//! Execution units.
//!
//! The CPU has a single functional unit, the integer ALU; stack and
//! console accesses are handled directly by the instruction handlers.

/// Integer arithmetic unit.
pub mod alu;
