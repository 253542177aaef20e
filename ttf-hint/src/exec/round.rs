//! Rounding state and compensating for the engine characteristics.
//!
//! See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#managing-the-graphics-state>
//! and <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#compensating-for-the-engine-characteristics>

// 10 instructions

use super::{super::round::RoundMode, ExecContext, OpResult};

impl ExecContext<'_, '_> {
    /// RTG[] (0x18), RTHG[] (0x19), RTDG[] (0x3D), RDTG[] (0x7D),
    /// RUTG[] (0x7C) and ROFF[] (0x7A)
    pub(super) fn op_round_mode(&mut self, mode: RoundMode) -> OpResult {
        self.graphics.round_state.mode = mode;
        Ok(())
    }

    /// Set super round.
    ///
    /// SROUND[] (0x76)
    ///
    /// Pops: n: number decomposed to obtain period, phase, threshold (Eint8)
    ///
    /// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#set-super_round>
    pub(super) fn op_sround(&mut self) -> OpResult {
        let n = self.stack.pop()?;
        self.graphics
            .round_state
            .set_super(RoundMode::Super, 0x4000, n);
        Ok(())
    }

    /// Set super round 45 degrees.
    ///
    /// S45ROUND[] (0x77)
    ///
    /// The grid period is sqrt(2)/2 pixels.
    pub(super) fn op_s45round(&mut self) -> OpResult {
        let n = self.stack.pop()?;
        self.graphics
            .round_state
            .set_super(RoundMode::Super45, 0x2D41, n);
        Ok(())
    }

    /// ROUND[ab] (0x68 - 0x6B)
    ///
    /// Pops: n1 (F26Dot6)
    /// Pushes: n2 (F26Dot6)
    ///
    /// Engine compensation is always zero so only the round state applies.
    pub(super) fn op_round(&mut self) -> OpResult {
        let round_state = self.graphics.round_state;
        self.stack.apply_unary(|n1| Ok(round_state.round(n1)))
    }

    /// NROUND[ab] (0x6C - 0x6F)
    ///
    /// Engine compensation is always zero so this leaves the value
    /// untouched.
    pub(super) fn op_nround(&mut self) -> OpResult {
        let n1 = self.stack.pop()?;
        self.stack.push(n1)
    }
}
