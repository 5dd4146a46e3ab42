//! Instruction Handlers.
//!
//! This module implements the semantics of every opcode. Handlers receive the
//! already-fetched operand words and return the control flow to apply:
//! 1. **Arithmetic:** `ADD`, `SUB`, `MUL`, `DIV`, `INC`, `DEC`, `CMP`, `MOVR`, `SWAP`.
//! 2. **Stack:** `PUSH`, `POP`, `LOAD`, `STORE`.
//! 3. **Control Flow:** `JMP`, `JZ`, `JNZ`, `JGT`, `LOOP`, `CALL`, `RET`, `HALT`, `NOP`.
//! 4. **Console:** `IN`, `GET`, `OUT`, `PUT`.
//!
//! Register operands are validated before any state changes, so a failing
//! handler leaves registers and stack untouched.

use super::Cpu;
use super::execution::Flow;
use crate::common::constants::{END_OF_INPUT, MAX_CHAR_VALUE};
use crate::common::{CpuError, Register};
use crate::core::units::alu::{Alu, AluOp};
use crate::isa::{MAX_OPERANDS, Opcode};
use crate::soc::devices::read_int;

impl Cpu {
    /// Executes `op` with its operand words.
    pub(super) fn execute(&mut self, op: Opcode, ops: [i32; MAX_OPERANDS]) -> Result<Flow, CpuError> {
        let [a, b] = ops;
        match op {
            Opcode::Nop => Ok(Flow::Next),
            Opcode::Halt => Ok(Flow::Halt),

            Opcode::Add => self.arith(AluOp::Add, a),
            Opcode::Sub => self.arith(AluOp::Sub, a),
            Opcode::Mul => self.arith(AluOp::Mul, a),
            Opcode::Div => self.arith(AluOp::Div, a),
            Opcode::Inc => self.step_reg(a, 1),
            Opcode::Dec => self.step_reg(a, -1),
            Opcode::Movr => {
                let reg = Register::try_from(a)?;
                self.regs.write(reg, b);
                Ok(Flow::Next)
            }
            Opcode::Swap => {
                let (r1, r2) = (Register::try_from(a)?, Register::try_from(b)?);
                self.regs.swap(r1, r2);
                Ok(Flow::Next)
            }
            Opcode::Cmp => {
                let (r1, r2) = (Register::try_from(a)?, Register::try_from(b)?);
                let diff = Alu::execute(AluOp::Sub, self.regs.read(r1), self.regs.read(r2))?;
                self.regs.write(Register::Result, diff);
                Ok(Flow::Next)
            }

            Opcode::Push => {
                let reg = Register::try_from(a)?;
                self.push(self.regs.read(reg))?;
                Ok(Flow::Next)
            }
            Opcode::Pop => {
                let reg = Register::try_from(a)?;
                let val = self.pop()?;
                self.regs.write(reg, val);
                Ok(Flow::Next)
            }
            Opcode::Load => {
                let reg = Register::try_from(a)?;
                let slot = self.indexed_slot(b)?;
                self.regs.write(reg, self.memory.read_slot(slot));
                Ok(Flow::Next)
            }
            Opcode::Store => {
                let reg = Register::try_from(a)?;
                let slot = self.indexed_slot(b)?;
                self.memory.write_slot(slot, self.regs.read(reg));
                Ok(Flow::Next)
            }

            Opcode::Jmp => Ok(self.branch(true, a)),
            Opcode::Jz => Ok(self.branch(self.regs.read(Register::Result) == 0, a)),
            Opcode::Jnz => Ok(self.branch(self.regs.read(Register::Result) != 0, a)),
            Opcode::Jgt => Ok(self.branch(self.regs.read(Register::Result) > 0, a)),
            Opcode::Loop => Ok(self.branch(self.regs.read(Register::C) != 0, a)),
            Opcode::Call => {
                self.push(b)?;
                Ok(self.branch(true, a))
            }
            Opcode::Ret => {
                let target = self.pop()?;
                Ok(self.branch(true, target))
            }

            Opcode::In => self.input_int(a),
            Opcode::Get => self.input_byte(a),
            Opcode::Out => self.output_int(a),
            Opcode::Put => self.output_char(a),
        }
    }

    /// `A <- A op reg`, mirrored into `RESULT`.
    fn arith(&mut self, op: AluOp, operand: i32) -> Result<Flow, CpuError> {
        let reg = Register::try_from(operand)?;
        let val = Alu::execute(op, self.regs.read(Register::A), self.regs.read(reg))?;
        self.regs.write(Register::A, val);
        self.regs.write(Register::Result, val);
        Ok(Flow::Next)
    }

    fn step_reg(&mut self, operand: i32, delta: i32) -> Result<Flow, CpuError> {
        let reg = Register::try_from(operand)?;
        let val = Alu::execute(AluOp::Add, self.regs.read(reg), delta)?;
        self.regs.write(reg, val);
        self.regs.write(Register::Result, val);
        Ok(Flow::Next)
    }

    const fn branch(&mut self, taken: bool, target: i32) -> Flow {
        self.stats.branch(taken);
        if taken { Flow::Jump(target) } else { Flow::Next }
    }

    fn input_int(&mut self, operand: i32) -> Result<Flow, CpuError> {
        let reg = Register::try_from(operand)?;
        let val = read_int(&mut *self.console)?;
        self.regs.write(reg, val);
        Ok(Flow::Next)
    }

    /// Reads one raw byte; end of input stores `-1` and clears `C`.
    fn input_byte(&mut self, operand: i32) -> Result<Flow, CpuError> {
        let reg = Register::try_from(operand)?;
        match self.console.read_byte()? {
            Some(byte) => self.regs.write(reg, i32::from(byte)),
            None => {
                self.regs.write(Register::C, 0);
                self.regs.write(reg, END_OF_INPUT);
            }
        }
        Ok(Flow::Next)
    }

    fn output_int(&mut self, operand: i32) -> Result<Flow, CpuError> {
        let reg = Register::try_from(operand)?;
        let text = self.regs.read(reg).to_string();
        self.console.write_all(text.as_bytes())?;
        Ok(Flow::Next)
    }

    fn output_char(&mut self, operand: i32) -> Result<Flow, CpuError> {
        let reg = Register::try_from(operand)?;
        let value = self.regs.read(reg);
        if !(0..=MAX_CHAR_VALUE).contains(&value) {
            return Err(CpuError::IllegalCharacter { value });
        }
        self.console.write_all(&[value as u8])?;
        Ok(Flow::Next)
    }
}
