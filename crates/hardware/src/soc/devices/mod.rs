//! I/O devices attached to the CPU.
//!
//! The only device is the console used by `IN`, `GET`, `OUT` and `PUT`.

/// Stream-backed console and decimal integer input.
pub mod console;

pub use console::{BufferConsole, StdConsole, StreamConsole, read_int};

pub use crate::soc::traits::Console;
