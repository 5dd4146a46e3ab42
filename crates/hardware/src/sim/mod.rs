//! Program loading.
//!
//! Provides utilities for turning raw program bytes into the memory image
//! a CPU is constructed over.

/// Byte stream to memory image loader.
pub mod loader;

pub use loader::{create_memory, create_memory_with, load_file};
