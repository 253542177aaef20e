//! Logical functions.
//!
//! See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#logical-functions>

// 11 instructions

use super::{ExecContext, OpResult};

impl ExecContext<'_, '_> {
    /// LT[] (0x50)
    ///
    /// Pops: e2, e1
    /// Pushes: 1 if e1 < e2, 0 otherwise
    pub(super) fn op_lt(&mut self) -> OpResult {
        self.stack.apply_binary(|a, b| Ok((a < b) as i32))
    }

    /// LTEQ[] (0x51)
    pub(super) fn op_lteq(&mut self) -> OpResult {
        self.stack.apply_binary(|a, b| Ok((a <= b) as i32))
    }

    /// GT[] (0x52)
    pub(super) fn op_gt(&mut self) -> OpResult {
        self.stack.apply_binary(|a, b| Ok((a > b) as i32))
    }

    /// GTEQ[] (0x53)
    pub(super) fn op_gteq(&mut self) -> OpResult {
        self.stack.apply_binary(|a, b| Ok((a >= b) as i32))
    }

    /// EQ[] (0x54)
    pub(super) fn op_eq(&mut self) -> OpResult {
        self.stack.apply_binary(|a, b| Ok((a == b) as i32))
    }

    /// NEQ[] (0x55)
    pub(super) fn op_neq(&mut self) -> OpResult {
        self.stack.apply_binary(|a, b| Ok((a != b) as i32))
    }

    /// ODD[] (0x56)
    ///
    /// Pops: e1 (F26Dot6)
    /// Pushes: 1 if the rounded value of e1 is odd, 0 otherwise
    ///
    /// Rounding uses the current round state.
    ///
    /// See <https://gitlab.freedesktop.org/freetype/freetype/-/blob/57617782464411201ce7bbc93b086c1b4d7d84a5/src/truetype/ttinterp.c#L2799>
    pub(super) fn op_odd(&mut self) -> OpResult {
        let round_state = self.graphics.round_state;
        self.stack
            .apply_unary(|e1| Ok((round_state.round(e1) & 127 == 64) as i32))
    }

    /// EVEN[] (0x57)
    ///
    /// Pops: e1 (F26Dot6)
    /// Pushes: 1 if the rounded value of e1 is even, 0 otherwise
    pub(super) fn op_even(&mut self) -> OpResult {
        let round_state = self.graphics.round_state;
        self.stack
            .apply_unary(|e1| Ok((round_state.round(e1) & 127 == 0) as i32))
    }

    /// AND[] (0x5A)
    pub(super) fn op_and(&mut self) -> OpResult {
        self.stack
            .apply_binary(|a, b| Ok((a != 0 && b != 0) as i32))
    }

    /// OR[] (0x5B)
    pub(super) fn op_or(&mut self) -> OpResult {
        self.stack
            .apply_binary(|a, b| Ok((a != 0 || b != 0) as i32))
    }

    /// NOT[] (0x5C)
    pub(super) fn op_not(&mut self) -> OpResult {
        self.stack.apply_unary(|e| Ok((e == 0) as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::super::MockContext;

    #[test]
    fn compare_ops() {
        let mut mock = MockContext::new();
        let mut ctx = mock.context();
        for a in -10..=10 {
            for b in -10..=10 {
                let input = &[a, b];
                ctx.test_exec(input, a < b, |ctx| {
                    ctx.op_lt().unwrap();
                });
                ctx.test_exec(input, a <= b, |ctx| {
                    ctx.op_lteq().unwrap();
                });
                ctx.test_exec(input, a > b, |ctx| {
                    ctx.op_gt().unwrap();
                });
                ctx.test_exec(input, a >= b, |ctx| {
                    ctx.op_gteq().unwrap();
                });
                ctx.test_exec(input, a == b, |ctx| {
                    ctx.op_eq().unwrap();
                });
                ctx.test_exec(input, a != b, |ctx| {
                    ctx.op_neq().unwrap();
                });
            }
        }
    }

    #[test]
    fn parity_ops() {
        let mut mock = MockContext::new();
        let mut ctx = mock.context();
        // These operate on 26.6 so values are multiple of 64
        let cases = [
            // (input, is_even)
            (0, true),
            (64, false),
            (128, true),
            (192, false),
            (256, true),
            (57, false),
            (-128, true),
        ];
        for (input, is_even) in cases {
            ctx.test_exec(&[input], is_even, |ctx| {
                ctx.op_even().unwrap();
            });
            ctx.test_exec(&[input], !is_even, |ctx| {
                ctx.op_odd().unwrap();
            });
        }
    }

    #[test]
    fn not_op() {
        let mut mock = MockContext::new();
        let mut ctx = mock.context();
        ctx.test_exec(&[0], 1, |ctx| {
            ctx.op_not().unwrap();
        });
        ctx.test_exec(&[234234], 0, |ctx| {
            ctx.op_not().unwrap();
        });
    }

    #[test]
    fn and_or_ops() {
        let mut mock = MockContext::new();
        let mut ctx = mock.context();
        for a in -2..=2 {
            for b in -2..=2 {
                let input = &[a, b];
                ctx.test_exec(input, a != 0 && b != 0, |ctx| {
                    ctx.op_and().unwrap();
                });
                ctx.test_exec(input, a != 0 || b != 0, |ctx| {
                    ctx.op_or().unwrap();
                });
            }
        }
    }
}
