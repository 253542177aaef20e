//! Conditional branches.
//!
//! Implements 3 instructions.
//!
//! See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#managing-the-flow-of-control>

use super::{
    super::error::{ControlFlowError, HintErrorKind},
    BranchFrame, Vm,
};

impl Vm<'_> {
    /// Returns true if instructions at the current position should run.
    ///
    /// Only the innermost frame is consulted.
    pub(super) fn should_execute(&self) -> bool {
        self.branches
            .last()
            .map(|frame| frame.should_execute)
            .unwrap_or(true)
    }

    /// If test.
    ///
    /// IF[] (0x58)
    ///
    /// Pops: e: stack element
    ///
    /// Inside a region that is already being skipped the condition is not
    /// popped and only the discard counter tracks the nesting.
    ///
    /// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#if-test>
    pub(super) fn op_if(&mut self) -> Result<(), HintErrorKind> {
        if !self.should_execute() {
            self.discard_depth += 1;
            return Ok(());
        }
        let e = self.stack.pop()?;
        self.branches.push(BranchFrame {
            should_execute: e != 0,
        });
        Ok(())
    }

    /// Else.
    ///
    /// ELSE[] (0x1B)
    ///
    /// Inverts the innermost frame. This happens even when the `ELSE`
    /// belongs to an `IF` that was only counted by the discard counter, in
    /// which case an enclosing frame is flipped.
    pub(super) fn op_else(&mut self) -> Result<(), HintErrorKind> {
        let frame = self
            .branches
            .last_mut()
            .ok_or(ControlFlowError::UnmatchedElse)?;
        frame.should_execute = !frame.should_execute;
        Ok(())
    }

    /// End if.
    ///
    /// EIF[] (0x59)
    pub(super) fn op_eif(&mut self) -> Result<(), HintErrorKind> {
        if self.discard_depth > 0 {
            self.discard_depth -= 1;
            return Ok(());
        }
        self.branches
            .pop()
            .ok_or(ControlFlowError::UnmatchedEndIf)?;
        Ok(())
    }
}
