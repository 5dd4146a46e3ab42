//! Instruction Disassembler.
//!
//! Converts opcode and operand words into human-readable text for debug
//! tracing, the CLI listing, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use tinycpu_core::isa::disasm::disassemble;
//!
//! let program = [0x09, 0, 5, 0x02, 1, 0x01];
//! assert_eq!(disassemble(&program, 0), ("movr A, 5".to_string(), 3));
//! assert_eq!(disassemble(&program, 3), ("add B".to_string(), 2));
//! ```

use std::fmt::Write;

use crate::common::Register;
use crate::isa::opcodes::{Opcode, OperandKind};

/// Renders a single operand word.
fn operand(kind: OperandKind, word: i32) -> String {
    match kind {
        OperandKind::Register => Register::try_from(word)
            .map_or_else(|_| format!("r{word}?"), |reg| reg.name().to_string()),
        OperandKind::Immediate => word.to_string(),
        OperandKind::Address => format!("@{word}"),
        OperandKind::Offset => format!("+{word}"),
    }
}

/// Disassembles the instruction starting at `addr`.
///
/// Returns the text and the number of words consumed. Unknown opcodes
/// render as a `.word` directive of width one; operands missing at the end
/// of `words` render as `?`. An `addr` past the end yields `("", 0)`.
///
/// # Arguments
///
/// * `words` - Memory image or program words.
/// * `addr` - Index of the opcode word.
pub fn disassemble(words: &[i32], addr: usize) -> (String, usize) {
    let Some(&word) = words.get(addr) else {
        return (String::new(), 0);
    };
    let Some(op) = Opcode::decode(word) else {
        return (format!(".word {word:#x}"), 1);
    };

    let mut text = op.mnemonic().to_string();
    for (i, kind) in op.operands().iter().enumerate() {
        text.push_str(if i == 0 { " " } else { ", " });
        match words.get(addr + 1 + i) {
            Some(&w) => text.push_str(&operand(*kind, w)),
            None => text.push('?'),
        }
    }
    (text, op.width())
}

/// Disassembles `words[start..end]` into a listing, one instruction per line.
///
/// Each line is `address: raw words  text`. Decoding resumes after each
/// instruction's full width, so operand words are never decoded as opcodes.
pub fn disassemble_range(words: &[i32], start: usize, end: usize) -> String {
    let end = end.min(words.len());
    let mut out = String::new();
    let mut addr = start;
    while addr < end {
        let (text, width) = disassemble(words, addr);
        let raw: Vec<String> = words[addr..(addr + width).min(words.len())]
            .iter()
            .map(|w| format!("{w:#06x}"))
            .collect();
        let _ = writeln!(out, "{addr:>6}: {:<22} {text}", raw.join(" "));
        addr += width.max(1);
    }
    out
}
