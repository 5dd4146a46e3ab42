//! Stream Console.
//!
//! Implements [`Console`] over any buffered reader and writer, and the
//! decimal integer reader used by `IN`.

use std::io::{self, BufRead, Write};

use crate::soc::traits::Console;

/// Console backed by a buffered input stream and an output stream.
#[derive(Debug)]
pub struct StreamConsole<R, W> {
    input: R,
    output: W,
}

/// Console attached to the process stdin and stdout.
///
/// The stdin lock is held only for the duration of a single read, so any
/// number of consoles may be alive at once.
#[derive(Debug)]
pub struct StdConsole {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl StdConsole {
    /// Attaches to the process stdin and stdout.
    pub fn stdio() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Console for StdConsole {
    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        peek_buffered(&mut self.stdin.lock())
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut input = self.stdin.lock();
        let byte = peek_buffered(&mut input)?;
        if byte.is_some() {
            input.consume(1);
        }
        Ok(byte)
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.stdout.write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

/// Console over in-memory buffers.
pub type BufferConsole = StreamConsole<io::Cursor<Vec<u8>>, Vec<u8>>;

impl BufferConsole {
    /// Creates a console that reads `input` and collects output in memory.
    pub fn with_input(input: impl Into<Vec<u8>>) -> Self {
        Self::new(io::Cursor::new(input.into()), Vec::new())
    }
}

impl<R, W> StreamConsole<R, W> {
    /// Wraps an input and an output stream.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the output stream.
    pub const fn output(&self) -> &W {
        &self.output
    }

    /// Splits the console back into its streams.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> Console for StreamConsole<R, W> {
    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        peek_buffered(&mut self.input)
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = peek_buffered(&mut self.input)?;
        if byte.is_some() {
            self.input.consume(1);
        }
        Ok(byte)
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.output.write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

/// Returns the next buffered byte, retrying interrupted reads.
fn peek_buffered(input: &mut impl BufRead) -> io::Result<Option<u8>> {
    loop {
        match input.fill_buf() {
            Ok(buf) => return Ok(buf.first().copied()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}

/// Reads a decimal integer from the console.
///
/// Leading ASCII whitespace is skipped, an optional `+` or `-` sign is
/// accepted, and digits are consumed up to the first non-digit, which is
/// left unread.
///
/// # Errors
///
/// Returns [`io::ErrorKind::UnexpectedEof`] if input ends before a digit,
/// [`io::ErrorKind::InvalidData`] if no digit follows or the value does not
/// fit in an `i32`, and any error from the console itself.
pub fn read_int(console: &mut dyn Console) -> io::Result<i32> {
    while let Some(b) = console.peek_byte()? {
        if !b.is_ascii_whitespace() {
            break;
        }
        let _ = console.read_byte()?;
    }

    let negative = match console.peek_byte()? {
        None => return Err(io::ErrorKind::UnexpectedEof.into()),
        Some(sign @ (b'-' | b'+')) => {
            let _ = console.read_byte()?;
            sign == b'-'
        }
        Some(_) => false,
    };

    let mut value: i64 = 0;
    let mut digits = 0usize;
    while let Some(b) = console.peek_byte()? {
        if !b.is_ascii_digit() {
            break;
        }
        let _ = console.read_byte()?;
        value = value * 10 + i64::from(b - b'0');
        if value > i64::from(i32::MAX) + 1 {
            return Err(io::ErrorKind::InvalidData.into());
        }
        digits += 1;
    }

    if digits == 0 {
        return Err(io::ErrorKind::InvalidData.into());
    }
    let value = if negative { -value } else { value };
    i32::try_from(value).map_err(|_| io::ErrorKind::InvalidData.into())
}
