//! Console trait for program I/O.
//!
//! This module defines the `Console` trait the I/O instructions talk to. It provides:
//! 1. **Input:** Byte-wise reads with one byte of lookahead, enough to parse integers.
//! 2. **Output:** Raw byte writes and an explicit flush.
//!
//! Input calls block until data or end of input is available.

use std::io;

/// Byte-oriented console attached to the CPU.
pub trait Console {
    /// Returns the next input byte without consuming it; `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying input stream.
    fn peek_byte(&mut self) -> io::Result<Option<u8>>;

    /// Consumes and returns the next input byte; `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying input stream.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Writes all of `bytes` to the output.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying output stream.
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Flushes buffered output.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying output stream.
    fn flush(&mut self) -> io::Result<()>;
}
