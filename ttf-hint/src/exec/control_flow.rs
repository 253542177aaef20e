//! Jumps.
//!
//! Branches and definitions are handled by the machine; this covers the
//! relative jump instructions which only request a new position.
//!
//! See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#managing-the-flow-of-control>

// 3 instructions

use super::{super::HintErrorKind, ExecContext, OpResult};

impl ExecContext<'_, '_> {
    /// Jump relative on true.
    ///
    /// JROT[] (0x78)
    ///
    /// Pops: e: stack element, offset: number of bytes to move (int32)
    pub(super) fn op_jrot(&mut self) -> OpResult {
        let e = self.stack.pop()?;
        self.do_jump(e != 0)
    }

    /// Jump.
    ///
    /// JMPR[] (0x1C)
    ///
    /// Pops: offset: number of bytes to move (int32)
    pub(super) fn op_jmpr(&mut self) -> OpResult {
        self.do_jump(true)
    }

    /// Jump relative on false.
    ///
    /// JROF[] (0x79)
    ///
    /// Pops: e: stack element, offset: number of bytes to move (int32)
    pub(super) fn op_jrof(&mut self) -> OpResult {
        let e = self.stack.pop()?;
        self.do_jump(e == 0)
    }

    /// Converts the byte offset, relative to the jump instruction, into a
    /// relative instruction count and stores it as the pending jump.
    ///
    /// Backward offsets are stored unresolved, in bytes. The driving loop
    /// never acts on them.
    fn do_jump(&mut self, test: bool) -> OpResult {
        let offset = self.stack.pop()?;
        if !test {
            return Ok(());
        }
        if offset <= 0 {
            *self.pending_jump = offset;
            return Ok(());
        }
        let pc = self
            .program
            .get(self.index)
            .ok_or(HintErrorKind::InvalidJump)?
            .pc;
        let target = pc
            .checked_add(offset as usize)
            .ok_or(HintErrorKind::InvalidJump)?;
        let end = self
            .program
            .last()
            .map(|ins| ins.pc + ins.byte_len())
            .unwrap_or_default();
        let target_index = if target == end {
            self.program.len()
        } else {
            self.program
                .iter()
                .position(|ins| ins.pc == target)
                .ok_or(HintErrorKind::InvalidJump)?
        };
        *self.pending_jump = target_index as i32 - self.index as i32;
        Ok(())
    }
}
