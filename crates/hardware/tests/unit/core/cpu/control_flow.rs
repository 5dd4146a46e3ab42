//! # Control Flow Tests
//!
//! Covers unconditional and conditional jumps, LOOP, and the CALL/RET pair.

use crate::common::harness::TestContext;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tinycpu_core::common::{CpuError, Register, StackFault, Status};

#[test]
fn jmp_skips_code() {
    // JMP 4 ; HALT(skipped) ; NOP ; HALT
    let mut ctx = TestContext::new(&[0x14, 4, 0x01, 0x00, 0x01]);
    ctx.step_n(1);
    assert_eq!(ctx.cpu.inst_index(), 4);
}

#[rstest]
#[case::jz_taken(0x15, 0, true)]
#[case::jz_not_taken(0x15, 3, false)]
#[case::jnz_taken(0x16, -3, true)]
#[case::jnz_not_taken(0x16, 0, false)]
#[case::jgt_taken(0x17, 1, true)]
#[case::jgt_zero(0x17, 0, false)]
#[case::jgt_negative(0x17, -1, false)]
fn conditional_jumps_test_result(#[case] opcode: i32, #[case] result: i32, #[case] taken: bool) {
    let mut ctx = TestContext::new(&[opcode, 10, 0x01]);
    ctx.cpu.set_reg(Register::Result, result);
    ctx.step_n(1);
    assert_eq!(ctx.cpu.inst_index(), if taken { 10 } else { 2 });
    assert_eq!(ctx.cpu.stats().branches_taken, u64::from(taken));
}

#[rstest]
#[case(0, 2)]
#[case(1, 0)]
#[case(-1, 0)]
fn loop_tests_c(#[case] c: i32, #[case] next: i32) {
    let mut ctx = TestContext::new(&[0x08, 0, 0x01]);
    ctx.cpu.set_reg(Register::C, c);
    ctx.step_n(1);
    assert_eq!(ctx.cpu.inst_index(), next);
    assert_eq!(ctx.cpu.reg(Register::C), c);
}

#[test]
fn countdown_loop_sums() {
    // MOVR C,5 ; top: SWAP B,C ; ADD B ; SWAP B,C ; DEC C ; LOOP top ; HALT
    // A accumulates 5 + 4 + 3 + 2 + 1.
    let program = [
        0x09, 2, 5, //
        0x10, 1, 2, //
        0x02, 1, //
        0x10, 1, 2, //
        0x07, 2, //
        0x08, 3, //
        0x01,
    ];
    let mut ctx = TestContext::new(&program);
    let _ = ctx.run();
    assert_eq!(ctx.cpu.status(), Status::Halted);
    assert_eq!(ctx.cpu.reg(Register::A), 15);
    assert_eq!(ctx.cpu.reg(Register::C), 0);
}

#[test]
fn call_then_ret_returns_after_the_call() {
    // 0: CALL 4, 3 ; 3: HALT ; 4: RET
    let mut ctx = TestContext::new(&[0x18, 4, 3, 0x01, 0x19]);
    ctx.step_n(1);
    assert_eq!(ctx.cpu.inst_index(), 4);
    assert_eq!(ctx.cpu.stack_size(), 1);
    assert_eq!(ctx.cpu.peek_stack(0), Some(3));

    ctx.step_n(1);
    assert_eq!(ctx.cpu.inst_index(), 3);
    assert_eq!(ctx.cpu.stack_size(), 0);

    ctx.step_n(1);
    assert_eq!(ctx.cpu.status(), Status::Halted);
}

#[test]
fn nested_calls_unwind_in_order() {
    // 0: CALL 6,3 ; 3: OUT A ; 5: HALT ; 6: INC A ; 8: CALL 12,11 ; 11: RET ; 12: INC A ; 14: RET
    let program = [
        0x18, 6, 3, //
        0x0E, 0, //
        0x01, //
        0x06, 0, //
        0x18, 12, 11, //
        0x19, //
        0x06, 0, //
        0x19,
    ];
    let mut ctx = TestContext::new(&program);
    assert_eq!(ctx.run(), 8);
    assert_eq!(ctx.cpu.status(), Status::Halted);
    assert_eq!(ctx.output(), "2");
    assert_eq!(ctx.cpu.stats().stack_high_water, 2);
}

#[test]
fn call_with_full_stack_overflows() {
    let mut ctx = TestContext::with_stack(&[0x18, 0, 3], 0);
    assert_eq!(
        ctx.cpu.step(),
        Err(CpuError::InvalidStackOperation(StackFault::Overflow))
    );
    assert_eq!(ctx.cpu.inst_index(), 2);
}

#[test]
fn ret_on_empty_stack_underflows() {
    let mut ctx = TestContext::new(&[0x19]);
    assert_eq!(ctx.run(), -1);
    assert_eq!(ctx.cpu.status(), Status::InvalidStackOperation);
}

#[test]
fn ret_to_a_bad_address_fails_on_fetch() {
    // PUSH A (A = 500) ; RET
    let mut ctx = TestContext::new(&[0x11, 0, 0x19]);
    ctx.cpu.set_reg(Register::A, 500);
    assert_eq!(ctx.run(), -3);
    assert_eq!(ctx.cpu.status(), Status::InvalidAddress);
    assert_eq!(ctx.cpu.inst_index(), 500);
}
