//! Arithmetic Logic Unit (ALU).
//!
//! Implements the integer operations behind `ADD`, `SUB`, `MUL`, `DIV`,
//! `INC`, `DEC` and `CMP`. All arithmetic is 32-bit two's complement and
//! wraps on overflow; `i32::MIN / -1` yields `i32::MIN`.

use crate::common::CpuError;

/// ALU operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`, truncating toward zero
    Div,
}

/// Arithmetic Logic Unit.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an ALU operation.
    ///
    /// # Errors
    ///
    /// Returns [`CpuError::DivByZero`] for [`AluOp::Div`] with `b == 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tinycpu_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 5, 3), Ok(8));
    /// assert_eq!(Alu::execute(AluOp::Add, i32::MAX, 1), Ok(i32::MIN));
    /// assert_eq!(Alu::execute(AluOp::Div, -7, 2), Ok(-3));
    /// assert!(Alu::execute(AluOp::Div, 1, 0).is_err());
    /// ```
    pub const fn execute(op: AluOp, a: i32, b: i32) -> Result<i32, CpuError> {
        match op {
            AluOp::Add => Ok(a.wrapping_add(b)),
            AluOp::Sub => Ok(a.wrapping_sub(b)),
            AluOp::Mul => Ok(a.wrapping_mul(b)),
            AluOp::Div => {
                if b == 0 {
                    Err(CpuError::DivByZero)
                } else {
                    Ok(a.wrapping_div(b))
                }
            }
        }
    }
}
