//! Program Loader.
//!
//! This module builds the memory image from a raw program. It performs:
//! 1. **Word packing:** Every four bytes form one word, least-significant byte first.
//! 2. **Growth:** The image grows in fixed blocks while reading.
//! 3. **Stack reservation:** A zeroed stack region is appended after the program.
//!
//! The program format has no header, magic number, or length prefix. Trailing
//! bytes that do not complete a word are dropped and reported.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::common::LoadError;
use crate::common::constants::{BYTE_BITS, WORD_SIZE};
use crate::config::MemoryConfig;
use crate::soc::memory::{Memory, buffer};

/// Packs four bytes into a word, byte 0 in the low-order bits.
#[inline]
pub const fn pack_word(bytes: [u8; WORD_SIZE]) -> i32 {
    let mut word: u32 = 0;
    let mut i = 0;
    while i < WORD_SIZE {
        word |= (bytes[i] as u32) << (i as u32 * BYTE_BITS);
        i += 1;
    }
    word as i32
}

/// Builds a memory image from a byte stream.
///
/// Reads `reader` to end of stream and appends `stack_capacity` zeroed words.
///
/// # Arguments
///
/// * `reader` - Source of program bytes.
/// * `stack_capacity` - Number of words to reserve for the stack.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if reading fails before end of stream and
/// [`LoadError::Allocation`] if the image cannot be grown. No partial image
/// is returned.
pub fn create_memory<R: Read>(reader: R, stack_capacity: usize) -> Result<Memory, LoadError> {
    let config = MemoryConfig {
        stack_capacity,
        ..MemoryConfig::default()
    };
    create_memory_with(reader, &config)
}

/// Builds a memory image using the stack capacity and block size from `config`.
///
/// # Errors
///
/// See [`create_memory`].
pub fn create_memory_with<R: Read>(mut reader: R, config: &MemoryConfig) -> Result<Memory, LoadError> {
    let block = config.effective_block_size();
    let mut words: Vec<i32> = Vec::new();
    buffer::reserve_blocks(&mut words, block, block)?;

    let mut chunk = vec![0u8; block.saturating_mul(WORD_SIZE)];
    let mut pending = [0u8; WORD_SIZE];
    let mut pending_len = 0usize;

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(LoadError::Io(e)),
        };
        for &byte in &chunk[..n] {
            pending[pending_len] = byte;
            pending_len += 1;
            if pending_len == WORD_SIZE {
                if words.len() == words.capacity() {
                    let needed = words.len() + 1;
                    buffer::reserve_blocks(&mut words, needed, block)?;
                }
                words.push(pack_word(pending));
                pending = [0; WORD_SIZE];
                pending_len = 0;
            }
        }
    }

    if pending_len != 0 {
        warn!(
            dropped = pending_len,
            "program size is not a multiple of {WORD_SIZE} bytes; trailing bytes ignored"
        );
    }

    let memory = Memory::with_stack(words, config.stack_capacity, block, pending_len)?;
    debug!(
        code_words = memory.code_len(),
        stack_capacity = memory.stack_capacity(),
        memory_size = memory.len(),
        "memory image built"
    );
    Ok(memory)
}

/// Loads a program file into a memory image.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be opened or read and
/// [`LoadError::Allocation`] if the image cannot be grown.
pub fn load_file(path: impl AsRef<Path>, config: &MemoryConfig) -> Result<Memory, LoadError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading program");
    let file = File::open(path)?;
    create_memory_with(BufReader::new(file), config)
}
