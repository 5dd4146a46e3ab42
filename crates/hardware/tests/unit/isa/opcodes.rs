//! # Opcode Table Tests
//!
//! Verifies the opcode numbering, operand layouts and decoding of the
//! instruction set table.

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::HashSet;
use tinycpu_core::isa::opcodes::table_is_consistent;
use tinycpu_core::isa::{InstrClass, MAX_OPERANDS, Opcode, OperandKind};

#[test]
fn table_is_contiguous_from_zero() {
    assert_eq!(Opcode::ALL.len(), 26);
    for (i, op) in Opcode::ALL.iter().enumerate() {
        assert_eq!(op.word(), i as i32, "{op}");
    }
    assert!(table_is_consistent());
}

#[test]
fn mnemonics_are_unique() {
    let names: HashSet<_> = Opcode::ALL.iter().map(|op| op.mnemonic()).collect();
    assert_eq!(names.len(), Opcode::ALL.len());
}

#[rstest]
#[case(Opcode::Nop, 0x00, "nop", &[])]
#[case(Opcode::Halt, 0x01, "halt", &[])]
#[case(Opcode::Loop, 0x08, "loop", &[OperandKind::Address])]
#[case(Opcode::Movr, 0x09, "movr", &[OperandKind::Register, OperandKind::Immediate])]
#[case(Opcode::Load, 0x0A, "load", &[OperandKind::Register, OperandKind::Offset])]
#[case(Opcode::Swap, 0x10, "swap", &[OperandKind::Register, OperandKind::Register])]
#[case(Opcode::Cmp, 19, "cmp", &[OperandKind::Register, OperandKind::Register])]
#[case(Opcode::Jgt, 23, "jgt", &[OperandKind::Address])]
#[case(Opcode::Call, 0x18, "call", &[OperandKind::Address, OperandKind::Address])]
#[case(Opcode::Ret, 0x19, "ret", &[])]
fn opcode_layouts(
    #[case] op: Opcode,
    #[case] word: i32,
    #[case] mnemonic: &str,
    #[case] operands: &[OperandKind],
) {
    assert_eq!(Opcode::decode(word), Some(op));
    assert_eq!(op.mnemonic(), mnemonic);
    assert_eq!(op.operands(), operands);
    assert_eq!(op.width(), 1 + operands.len());
}

#[test]
fn operand_counts_never_exceed_maximum() {
    assert!(Opcode::ALL.iter().all(|op| op.operand_count() <= MAX_OPERANDS));
}

#[rstest]
#[case(-1)]
#[case(0x1A)]
#[case(0xFF)]
#[case(i32::MAX)]
fn unknown_words_do_not_decode(#[case] word: i32) {
    assert_eq!(Opcode::decode(word), None);
    assert_eq!(Opcode::try_from(word), Err(word));
}

#[test]
fn classes() {
    assert_eq!(Opcode::Div.class(), InstrClass::Alu);
    assert_eq!(Opcode::Push.class(), InstrClass::Stack);
    assert_eq!(Opcode::Ret.class(), InstrClass::Branch);
    assert_eq!(Opcode::Get.class(), InstrClass::Io);
    assert_eq!(Opcode::Halt.class(), InstrClass::System);
}
