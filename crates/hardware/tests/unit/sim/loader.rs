//! # Loader Tests
//!
//! Covers word packing, trailing byte handling, stack reservation, block
//! growth across read boundaries, and read failures.

use crate::common::harness::to_bytes;
use pretty_assertions::assert_eq;
use std::io::{self, Read, Write};
use tinycpu_core::common::{LoadError, Register, Status};
use tinycpu_core::config::MemoryConfig;
use tinycpu_core::sim::loader::{create_memory, create_memory_with, load_file, pack_word};
use tinycpu_core::soc::BufferConsole;
use tinycpu_core::{Config, Cpu};

/// Reader that yields its data one byte per call, then optionally fails.
struct Trickle {
    data: Vec<u8>,
    pos: usize,
    fail_at_end: bool,
}

impl Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.data.len() {
            return if self.fail_at_end {
                Err(io::Error::other("disk on fire"))
            } else {
                Ok(0)
            };
        }
        buf[0] = self.data[self.pos];
        self.pos += 1;
        Ok(1)
    }
}

#[test]
fn packs_little_endian() {
    assert_eq!(pack_word([0x78, 0x56, 0x34, 0x12]), 0x1234_5678);
    assert_eq!(pack_word([0xFF, 0xFF, 0xFF, 0xFF]), -1);
    assert_eq!(pack_word([0x00, 0x00, 0x00, 0x80]), i32::MIN);
}

#[test]
fn seven_bytes_yield_one_word() {
    let bytes = [1, 0, 0, 0, 2, 0, 0];
    let memory = create_memory(&bytes[..], 4).unwrap();
    assert_eq!(memory.code(), &[1]);
    assert_eq!(memory.dropped_bytes(), 3);
    assert_eq!(memory.len(), 1 + 4);
    assert_eq!(memory.end_of_code(), 0);
}

#[test]
fn stack_region_is_zeroed_and_sized_exactly() {
    let bytes = to_bytes(&[0x09, 0, 5, 0x01]);
    let memory = create_memory(&bytes[..], 10).unwrap();
    assert_eq!(memory.len(), 14);
    assert_eq!(memory.stack_capacity(), 10);
    assert_eq!(memory.stack_top(), Some(13));
    assert!(memory.words()[4..].iter().all(|&w| w == 0));
}

#[test]
fn empty_stream_gives_stack_only() {
    let memory = create_memory(io::empty(), 3).unwrap();
    assert_eq!(memory.code_len(), 0);
    assert_eq!(memory.len(), 3);
    assert_eq!(memory.end_of_code(), -1);
}

#[test]
fn zero_stack_capacity_has_no_stack_top() {
    let memory = create_memory(&[1u8, 0, 0, 0][..], 0).unwrap();
    assert_eq!(memory.stack_top(), None);
    assert_eq!(memory.len(), 1);
}

#[test]
fn grows_across_many_blocks_and_short_reads() {
    let words: Vec<i32> = (0..50).map(|i| i * 1000 - 7).collect();
    let config = MemoryConfig {
        stack_capacity: 5,
        block_size: 4,
    };
    let reader = Trickle {
        data: to_bytes(&words),
        pos: 0,
        fail_at_end: false,
    };
    let memory = create_memory_with(reader, &config).unwrap();
    assert_eq!(memory.code(), words.as_slice());
    assert_eq!(memory.len(), 55);
}

#[test]
fn full_block_grows_by_one_block() {
    let config = MemoryConfig {
        stack_capacity: 2,
        block_size: 1,
    };
    let bytes = to_bytes(&[7, -8, 9]);
    let memory = create_memory_with(&bytes[..], &config).unwrap();
    assert_eq!(memory.code(), &[7, -8, 9]);
    assert_eq!(memory.len(), 5);
    assert_eq!(memory.dropped_bytes(), 0);
}

#[test]
fn read_error_returns_no_image() {
    let reader = Trickle {
        data: vec![1, 0, 0, 0],
        pos: 0,
        fail_at_end: true,
    };
    let err = create_memory(reader, 4).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)), "{err}");
}

#[test]
fn loads_and_runs_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    // MOVR A,5 ; ADD B ; OUT A ; HALT
    file.write_all(&to_bytes(&[0x09, 0, 5, 0x02, 1, 0x0E, 0, 0x01]))
        .unwrap();

    let memory = load_file(file.path(), &MemoryConfig::default()).unwrap();
    assert_eq!(memory.stack_capacity(), 256);

    let mut cpu = Cpu::with_console(memory, Box::new(BufferConsole::with_input("")), &Config::default());
    cpu.set_reg(Register::B, 3);
    assert_eq!(cpu.run(100), 4);
    assert_eq!(cpu.status(), Status::Halted);
    assert_eq!(cpu.reg(Register::A), 8);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_file(dir.path().join("nope.bin"), &MemoryConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)), "{err}");
}
