//! Value stack for the TrueType interpreter.

use ttf_bytecode::InlineOperands;

use super::error::HintErrorKind;

use HintErrorKind::{StackOverflow, StackUnderflow};

/// Operand stack for the TrueType interpreter.
///
/// Values are plain `i32`s that consuming instructions interpret as either
/// integers or 26.6 fixed point numbers. The depth is unbounded unless a
/// maximum is supplied, usually from `maxp.maxStackElements`.
///
/// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#managing-the-stack>
#[derive(Clone, Default, Debug)]
pub struct ValueStack {
    values: Vec<i32>,
    max_depth: Option<usize>,
}

impl ValueStack {
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            values: Vec::new(),
            max_depth,
        }
    }

    /// Returns the depth of the stack
    /// <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#returns-the-depth-of-the-stack>
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the current values, bottom first.
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn push(&mut self, value: i32) -> Result<(), HintErrorKind> {
        self.reserve(1)?;
        self.values.push(value);
        Ok(())
    }

    /// Pushes values that have been decoded from the instruction stream
    /// onto the stack.
    ///
    /// Implements the PUSHB[], PUSHW[], NPUSHB[] and NPUSHW[] instructions.
    ///
    /// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#pushing-data-onto-the-interpreter-stack>
    pub fn push_inline_operands(
        &mut self,
        operands: &InlineOperands,
    ) -> Result<(), HintErrorKind> {
        self.reserve(operands.len())?;
        self.values.extend(operands.values());
        Ok(())
    }

    pub fn peek(&self) -> Option<i32> {
        self.values.last().copied()
    }

    /// Pops a value from the stack.
    ///
    /// Implements the POP[] instruction.
    ///
    /// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#pop-top-stack-element>
    pub fn pop(&mut self) -> Result<i32, HintErrorKind> {
        self.values.pop().ok_or(StackUnderflow)
    }

    /// Convenience method for instructions that pop values that are used as an
    /// index.
    pub fn pop_usize(&mut self) -> Result<usize, HintErrorKind> {
        Ok(self.pop()? as usize)
    }

    /// Pops `count` values, discarding them.
    pub fn pop_n(&mut self, count: usize) -> Result<(), HintErrorKind> {
        let new_len = self.values.len().checked_sub(count).ok_or(StackUnderflow)?;
        self.values.truncate(new_len);
        Ok(())
    }

    /// Applies a unary operation.
    ///
    /// Pops `a` from the stack and pushes `op(a)`.
    pub fn apply_unary(
        &mut self,
        mut op: impl FnMut(i32) -> Result<i32, HintErrorKind>,
    ) -> Result<(), HintErrorKind> {
        let a = self.pop()?;
        self.push(op(a)?)
    }

    /// Applies a binary operation.
    ///
    /// Pops `b` and `a` from the stack and pushes `op(a, b)`.
    pub fn apply_binary(
        &mut self,
        mut op: impl FnMut(i32, i32) -> Result<i32, HintErrorKind>,
    ) -> Result<(), HintErrorKind> {
        let b = self.pop()?;
        let a = self.pop()?;
        self.push(op(a, b)?)
    }

    /// Clear the entire stack.
    ///
    /// Implements the CLEAR[] instruction.
    ///
    /// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#clear-the-entire-stack>
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Duplicate top stack element.
    ///
    /// Implements the DUP[] instruction.
    pub fn dup(&mut self) -> Result<(), HintErrorKind> {
        let value = self.peek().ok_or(StackUnderflow)?;
        self.push(value)
    }

    /// Swap the top two elements on the stack.
    ///
    /// Implements the SWAP[] instruction.
    pub fn swap(&mut self) -> Result<(), HintErrorKind> {
        let len = self.values.len();
        if len < 2 {
            return Err(StackUnderflow);
        }
        self.values.swap(len - 1, len - 2);
        Ok(())
    }

    /// Copy the indexed element to the top of the stack.
    ///
    /// The index is popped first and counts from 1 at the new top.
    ///
    /// Implements the CINDEX[] instruction.
    ///
    /// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#copy-the-indexed-element-to-the-top-of-the-stack>
    pub fn copy_index(&mut self) -> Result<(), HintErrorKind> {
        let top_ix = self.values.len().checked_sub(1).ok_or(StackUnderflow)?;
        let index = self.values[top_ix] as usize;
        let element_ix = top_ix.checked_sub(index).ok_or(StackUnderflow)?;
        // An index of zero would refer to the index value itself.
        if element_ix == top_ix {
            return Err(StackUnderflow);
        }
        self.values[top_ix] = self.values[element_ix];
        Ok(())
    }

    /// Moves the indexed element to the top of the stack.
    ///
    /// Implements the MINDEX[] instruction.
    ///
    /// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#move-the-indexed-element-to-the-top-of-the-stack>
    pub fn move_index(&mut self) -> Result<(), HintErrorKind> {
        let index = self.pop_usize()?;
        let element_ix = self.values.len().checked_sub(index).ok_or(StackUnderflow)?;
        if index == 0 {
            return Err(StackUnderflow);
        }
        let value = self.values.remove(element_ix);
        self.values.push(value);
        Ok(())
    }

    /// Roll the top three stack elements.
    ///
    /// Moves the third element to the top.
    ///
    /// Implements the ROLL[] instruction.
    pub fn roll(&mut self) -> Result<(), HintErrorKind> {
        let len = self.values.len();
        if len < 3 {
            return Err(StackUnderflow);
        }
        self.values[len - 3..].rotate_left(1);
        Ok(())
    }

    fn reserve(&self, count: usize) -> Result<(), HintErrorKind> {
        match self.max_depth {
            Some(max) if self.values.len() + count > max => Err(StackOverflow),
            _ => Ok(()),
        }
    }
}
