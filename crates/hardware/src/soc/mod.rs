//! Machine components outside the CPU core.
//!
//! This module organizes the memory image the CPU executes from and the
//! console device it performs I/O through.

/// Console device implementations.
pub mod devices;

/// Word-addressed memory image.
pub mod memory;

/// Device trait definitions.
pub mod traits;

pub use devices::{BufferConsole, StdConsole, StreamConsole};
pub use memory::Memory;
pub use traits::Console;
