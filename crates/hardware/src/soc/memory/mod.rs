//! Word-Addressed Memory Image.
//!
//! This module implements the flat memory of the machine. It provides:
//! 1. **Buffer:** Block-wise growth of the backing `Vec<i32>`.
//! 2. **Memory:** The image itself: program words followed by a zeroed stack region.
//! 3. **Stack Addressing:** Mapping from logical stack slots to memory addresses.
//!
//! Layout, with `n` program words and stack capacity `c`:
//!
//! ```text
//! 0 ........ n-1 | n ................ n+c-1
//!     code       |  stack (slot 0 at n+c-1, grows downward)
//! ```

/// Block-wise buffer growth.
pub mod buffer;

use crate::common::LoadError;
use crate::common::constants::BLOCK_SIZE;

/// The memory image owned by a CPU.
///
/// Invariant: `len() == code_len() + stack_capacity()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    words: Vec<i32>,
    code_len: usize,
    stack_capacity: usize,
    dropped_bytes: usize,
}

impl Memory {
    /// Builds a memory image from program words.
    ///
    /// # Arguments
    ///
    /// * `program` - Code and data words, placed at address 0.
    /// * `stack_capacity` - Number of zeroed stack words appended after the program.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Allocation`] if the image cannot be allocated.
    pub fn from_words(program: &[i32], stack_capacity: usize) -> Result<Self, LoadError> {
        let mut words = Vec::new();
        buffer::reserve_blocks(&mut words, program.len(), BLOCK_SIZE)?;
        words.extend_from_slice(program);
        Self::with_stack(words, stack_capacity, BLOCK_SIZE, 0)
    }

    /// Appends a zeroed stack region of `stack_capacity` words to `code`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Allocation`] if the image cannot be grown.
    pub(crate) fn with_stack(
        mut code: Vec<i32>,
        stack_capacity: usize,
        block: usize,
        dropped_bytes: usize,
    ) -> Result<Self, LoadError> {
        let code_len = code.len();
        let total = code_len
            .checked_add(stack_capacity)
            .ok_or(LoadError::Allocation { words: usize::MAX })?;
        buffer::reserve_blocks(&mut code, total, block)?;
        code.resize(total, 0);
        Ok(Self {
            words: code,
            code_len,
            stack_capacity,
            dropped_bytes,
        })
    }

    /// Total size in words (program plus stack region).
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` for an empty program with no stack.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of program words.
    pub const fn code_len(&self) -> usize {
        self.code_len
    }

    /// Number of words reserved for the stack.
    pub const fn stack_capacity(&self) -> usize {
        self.stack_capacity
    }

    /// Trailing bytes of the source that did not form a full word.
    pub const fn dropped_bytes(&self) -> usize {
        self.dropped_bytes
    }

    /// Highest address an instruction may be fetched from; `-1` when there
    /// is no code.
    pub const fn end_of_code(&self) -> i64 {
        self.code_len as i64 - 1
    }

    /// Address of the last memory slot (stack slot 0), if a stack exists.
    pub const fn stack_top(&self) -> Option<usize> {
        if self.stack_capacity == 0 {
            None
        } else {
            Some(self.code_len + self.stack_capacity - 1)
        }
    }

    /// Reads a word, `None` outside the image.
    #[inline]
    pub fn read(&self, addr: usize) -> Option<i32> {
        self.words.get(addr).copied()
    }

    /// All words, code followed by stack.
    pub fn words(&self) -> &[i32] {
        &self.words
    }

    /// Program words only.
    pub fn code(&self) -> &[i32] {
        &self.words[..self.code_len]
    }

    /// Address of logical stack slot `slot` (0 = first pushed).
    ///
    /// Callers guarantee `slot < stack_capacity()`.
    #[inline]
    pub(crate) const fn slot_addr(&self, slot: usize) -> usize {
        self.code_len + self.stack_capacity - 1 - slot
    }

    /// Reads logical stack slot `slot`.
    #[inline]
    pub(crate) fn read_slot(&self, slot: usize) -> i32 {
        self.words[self.slot_addr(slot)]
    }

    /// Writes logical stack slot `slot`.
    #[inline]
    pub(crate) fn write_slot(&mut self, slot: usize, val: i32) {
        let addr = self.slot_addr(slot);
        self.words[addr] = val;
    }

    /// Zeroes the stack region, leaving code untouched.
    pub fn clear_stack(&mut self) {
        self.words[self.code_len..].fill(0);
    }

    /// Zeroes the whole image and releases it.
    pub(crate) fn wipe(mut self) {
        self.words.fill(0);
        drop(self);
    }
}
