//! # Execution Loop Tests
//!
//! Covers status gating, instruction fetch bounds, operand fetch policy, HALT
//! semantics and the step count returned by `run`.

use crate::common::harness::TestContext;
use pretty_assertions::assert_eq;
use tinycpu_core::Config;
use tinycpu_core::common::{CpuError, Register, Status};

#[test]
fn movr_add_halt_example() {
    let mut ctx = TestContext::new(&[0x09, 0, 5, 0x02, 1, 0x01]);
    ctx.cpu.set_reg(Register::B, 3);
    assert_eq!(ctx.run(), 3);
    assert_eq!(ctx.cpu.reg(Register::A), 8);
    assert_eq!(ctx.cpu.reg(Register::Result), 8);
    assert_eq!(ctx.cpu.status(), Status::Halted);
}

#[test]
fn halt_leaves_pointer_on_the_instruction() {
    let mut ctx = TestContext::new(&[0x00, 0x01, 0x00]);
    ctx.step_n(2);
    assert_eq!(ctx.cpu.status(), Status::Halted);
    assert_eq!(ctx.cpu.inst_index(), 1);
}

#[test]
fn step_after_halt_is_rejected() {
    let mut ctx = TestContext::new(&[0x01]);
    ctx.step_n(1);
    assert_eq!(ctx.cpu.step(), Err(CpuError::NotRunning(Status::Halted)));
    assert_eq!(ctx.cpu.status(), Status::Halted);
    assert_eq!(ctx.cpu.stats().faults, 0);
}

#[test]
fn run_returns_zero_when_not_ok() {
    let mut ctx = TestContext::new(&[0xFF]);
    assert_eq!(ctx.run(), -1);
    assert_eq!(ctx.run(), 0);
    assert_eq!(ctx.cpu.status(), Status::IllegalInstruction);
}

#[test]
fn illegal_opcode_counts_the_failing_step() {
    let mut ctx = TestContext::new(&[0x00, 0x00, 0xFF, 0x01]);
    assert_eq!(ctx.run(), -3);
    assert_eq!(ctx.cpu.status(), Status::IllegalInstruction);
    assert_eq!(ctx.cpu.inst_index(), 2);
}

#[test]
fn illegal_opcode_error_names_word_and_address() {
    let mut ctx = TestContext::new(&[0x00, 0x1A]);
    ctx.step_n(1);
    assert_eq!(
        ctx.cpu.step(),
        Err(CpuError::IllegalInstruction { opcode: 0x1A, addr: 1 })
    );
}

#[test]
fn jump_outside_code_fails_on_next_fetch() {
    // JMP 100 ; then padding to end_of_code == 10
    let mut program = vec![0x14, 100];
    program.resize(11, 0x00);
    let mut ctx = TestContext::new(&program);
    assert_eq!(ctx.cpu.end_of_code(), 10);

    ctx.step_n(1);
    assert_eq!(ctx.cpu.inst_index(), 100);
    assert_eq!(ctx.cpu.status(), Status::Ok);
    assert_eq!(ctx.cpu.step(), Err(CpuError::InvalidAddress { addr: 100 }));
    assert_eq!(ctx.cpu.status(), Status::InvalidAddress);
}

#[test]
fn fetch_from_the_stack_region_is_invalid() {
    // The stack is zero-filled, so running off the end must not execute NOPs.
    let mut ctx = TestContext::new(&[0x00]);
    assert_eq!(ctx.run(), -2);
    assert_eq!(ctx.cpu.status(), Status::InvalidAddress);
}

#[test]
fn negative_instruction_pointer_is_invalid() {
    let mut ctx = TestContext::new(&[0x01]);
    ctx.cpu.set_inst_index(-1);
    assert_eq!(ctx.cpu.step(), Err(CpuError::InvalidAddress { addr: -1 }));
}

#[test]
fn empty_program_faults_immediately() {
    let mut ctx = TestContext::new(&[]);
    assert_eq!(ctx.run(), -1);
    assert_eq!(ctx.cpu.status(), Status::InvalidAddress);
}

#[test]
fn truncated_operands_fail_before_any_effect() {
    // MOVR A, <missing>: the immediate would come from the stack region.
    let mut ctx = TestContext::new(&[0x09, 0]);
    assert_eq!(ctx.cpu.step(), Err(CpuError::InvalidAddress { addr: 2 }));
    assert_eq!(ctx.cpu.inst_index(), 0);
    assert_eq!(ctx.cpu.reg(Register::A), 0);
}

#[test]
fn lenient_operand_fetch_reads_into_the_stack() {
    let mut config = Config::default();
    config.memory.stack_capacity = 4;
    config.execution.strict_operand_fetch = false;
    // MOVR A, <stack word 0>
    let mut ctx = TestContext::with_config(&[0x09, 0], &config);
    assert_eq!(ctx.cpu.step(), Ok(()));
    assert_eq!(ctx.cpu.reg(Register::A), 0);
    assert_eq!(ctx.cpu.inst_index(), 3);
}

#[test]
fn lenient_operand_fetch_still_rejects_past_memory() {
    let mut config = Config::default();
    config.memory.stack_capacity = 0;
    config.execution.strict_operand_fetch = false;
    let mut ctx = TestContext::with_config(&[0x09, 0], &config);
    assert_eq!(ctx.cpu.step(), Err(CpuError::InvalidAddress { addr: 2 }));
}

#[test]
fn run_stops_at_the_step_budget() {
    // JMP 0 forever
    let mut ctx = TestContext::new(&[0x14, 0]);
    assert_eq!(ctx.cpu.run(25), 25);
    assert_eq!(ctx.cpu.status(), Status::Ok);
    assert_eq!(ctx.cpu.run(0), 0);
}

#[test]
fn failing_handler_leaves_pointer_after_operands() {
    // NOP ; ADD 7
    let mut ctx = TestContext::new(&[0x00, 0x02, 7]);
    assert_eq!(ctx.run(), -2);
    assert_eq!(ctx.cpu.status(), Status::IllegalOperand);
    assert_eq!(ctx.cpu.inst_index(), 2);
}

#[test]
fn tracing_does_not_change_results() {
    let mut ctx = TestContext::new(&[0x09, 0, 5, 0x02, 0, 0x01]);
    ctx.cpu.set_trace(true);
    assert_eq!(ctx.run(), 3);
    assert_eq!(ctx.cpu.reg(Register::A), 10);
}
