//! Arithmetic and math instructions.
//!
//! See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#arithmetic-and-math-instructions>

// 10 instructions

use super::{
    super::math::{ceil, floor, mul_div, mul_div_no_round},
    super::HintErrorKind,
    ExecContext, OpResult,
};

impl ExecContext<'_, '_> {
    /// ADD[] (0x60)
    ///
    /// Pops: n1, n2 (F26Dot6)
    /// Pushes: (n2 + n1)
    pub(super) fn op_add(&mut self) -> OpResult {
        self.stack.apply_binary(|a, b| Ok(a.wrapping_add(b)))
    }

    /// SUB[] (0x61)
    ///
    /// Pops: n1, n2 (F26Dot6)
    /// Pushes: (n2 - n1)
    pub(super) fn op_sub(&mut self) -> OpResult {
        self.stack.apply_binary(|a, b| Ok(a.wrapping_sub(b)))
    }

    /// DIV[] (0x62)
    ///
    /// Pops: n1, n2 (F26Dot6)
    /// Pushes: (n2/n1)
    ///
    /// Note that this truncates rather than rounds the value.
    ///
    /// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#divide>
    pub(super) fn op_div(&mut self) -> OpResult {
        self.stack.apply_binary(|a, b| {
            if b == 0 {
                Err(HintErrorKind::DivideByZero)
            } else {
                Ok(mul_div_no_round(a, 64, b))
            }
        })
    }

    /// MUL[] (0x63)
    ///
    /// Pops: n1, n2 (F26Dot6)
    /// Pushes: (n2 * n1)
    pub(super) fn op_mul(&mut self) -> OpResult {
        self.stack.apply_binary(|a, b| Ok(mul_div(a, b, 64)))
    }

    /// ABS[] (0x64)
    pub(super) fn op_abs(&mut self) -> OpResult {
        self.stack.apply_unary(|n| Ok(n.wrapping_abs()))
    }

    /// NEG[] (0x65)
    pub(super) fn op_neg(&mut self) -> OpResult {
        self.stack.apply_unary(|n1| Ok(n1.wrapping_neg()))
    }

    /// FLOOR[] (0x66)
    ///
    /// Pops n1 and returns n, the greatest integer value less than or equal
    /// to n1.
    pub(super) fn op_floor(&mut self) -> OpResult {
        self.stack.apply_unary(|n1| Ok(floor(n1)))
    }

    /// CEILING[] (0x67)
    ///
    /// Pops n1 and returns n, the least integer value greater than or equal
    /// to n1.
    pub(super) fn op_ceiling(&mut self) -> OpResult {
        self.stack.apply_unary(|n1| Ok(ceil(n1)))
    }

    /// MAX[] (0x8B)
    pub(super) fn op_max(&mut self) -> OpResult {
        self.stack.apply_binary(|a, b| Ok(a.max(b)))
    }

    /// MIN[] (0x8C)
    pub(super) fn op_min(&mut self) -> OpResult {
        self.stack.apply_binary(|a, b| Ok(a.min(b)))
    }
}
