//! Managing the stack.
//!
//! See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#managing-the-stack>

// 9 instructions

use ttf_bytecode::InlineOperands;

use super::{ExecContext, OpResult};

impl ExecContext<'_, '_> {
    /// PUSHB[abc], PUSHW[abc], NPUSHB[] and NPUSHW[]
    pub(super) fn op_push(&mut self, operands: &InlineOperands) -> OpResult {
        self.stack.push_inline_operands(operands)
    }

    /// DUP[] (0x20)
    pub(super) fn op_dup(&mut self) -> OpResult {
        self.stack.dup()
    }

    /// POP[] (0x21)
    pub(super) fn op_pop(&mut self) -> OpResult {
        self.stack.pop()?;
        Ok(())
    }

    /// CLEAR[] (0x22)
    pub(super) fn op_clear(&mut self) -> OpResult {
        self.stack.clear();
        Ok(())
    }

    /// SWAP[] (0x23)
    pub(super) fn op_swap(&mut self) -> OpResult {
        self.stack.swap()
    }

    /// DEPTH[] (0x24)
    ///
    /// Pushes the number of elements on the stack before this instruction.
    pub(super) fn op_depth(&mut self) -> OpResult {
        let n = self.stack.len();
        self.stack.push(n as i32)
    }

    /// CINDEX[] (0x25)
    pub(super) fn op_cindex(&mut self) -> OpResult {
        self.stack.copy_index()
    }

    /// MINDEX[] (0x26)
    pub(super) fn op_mindex(&mut self) -> OpResult {
        self.stack.move_index()
    }

    /// ROLL[] (0x8A)
    pub(super) fn op_roll(&mut self) -> OpResult {
        self.stack.roll()
    }
}

#[cfg(test)]
mod tests {
    use super::super::MockContext;
    use ttf_bytecode::MockInlineOperands;

    #[test]
    fn stack_ops() {
        let mut mock = MockContext::new();
        let mut ctx = mock.context();
        let byte_args = MockInlineOperands::from_bytes(&[2, 4, 6, 8]);
        let word_args = MockInlineOperands::from_words(&[-2000, 4000, -6000, 8000]);
        let initial_stack = byte_args
            .operands()
            .values()
            .chain(word_args.operands().values())
            .collect::<Vec<_>>();
        // Push instructions
        ctx.op_push(&byte_args.operands()).unwrap();
        ctx.op_push(&word_args.operands()).unwrap();
        assert_eq!(ctx.stack.values(), initial_stack);
        // DEPTH[]
        ctx.op_depth().unwrap();
        assert_eq!(ctx.stack.pop().ok(), Some(initial_stack.len() as i32));
        // POP[]
        ctx.op_pop().unwrap();
        ctx.op_pop().unwrap();
        assert_eq!(ctx.stack.values(), &initial_stack[..initial_stack.len() - 2]);
        // SWAP[]
        ctx.op_swap().unwrap();
        assert_eq!(&ctx.stack.values()[4..], &[4000, -2000]);
        // ROLL[]
        ctx.op_roll().unwrap();
        assert_eq!(&ctx.stack.values()[3..], &[4000, -2000, 8]);
        // CINDEX[]
        ctx.stack.push(4).unwrap();
        ctx.op_cindex().unwrap();
        assert_eq!(ctx.stack.peek(), Some(6));
        // MINDEX[]
        ctx.stack.push(3).unwrap();
        ctx.op_mindex().unwrap();
        assert_eq!(ctx.stack.peek(), Some(-2000));
        // DUP[]
        ctx.op_dup().unwrap();
        assert_eq!(&ctx.stack.values()[6..], &[-2000, -2000]);
        // CLEAR[]
        ctx.op_clear().unwrap();
        assert!(ctx.stack.is_empty());
        assert!(ctx.op_pop().is_err());
    }
}
