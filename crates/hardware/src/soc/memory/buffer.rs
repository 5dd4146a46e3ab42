//! Word Buffer Growth.
//!
//! The memory image is a plain `Vec<i32>`. This module grows it in whole
//! blocks, reporting allocation failure instead of aborting the process.

use crate::common::LoadError;

/// Ensures `words` can hold at least `needed` words.
///
/// Capacity is raised in multiples of `block` words, mirroring page-sized
/// growth; the length is left unchanged.
///
/// # Errors
///
/// Returns [`LoadError::Allocation`] if the allocator refuses the request or
/// the size overflows.
pub fn reserve_blocks(words: &mut Vec<i32>, needed: usize, block: usize) -> Result<(), LoadError> {
    if needed <= words.capacity() {
        return Ok(());
    }
    let block = block.max(1);
    let target = needed
        .div_ceil(block)
        .checked_mul(block)
        .ok_or(LoadError::Allocation { words: needed })?;
    words
        .try_reserve_exact(target - words.len())
        .map_err(|_| LoadError::Allocation { words: target })
}
