//! Measurement, information and debugging instructions.
//!
//! Implements 7 instructions.
//!
//! See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#miscellaneous-instructions>

use super::{super::HintErrorKind, ExecContext, OpResult};

impl ExecContext<'_, '_> {
    /// Measure pixels per em.
    ///
    /// MPPEM[] (0x4B)
    ///
    /// Pushes: ppem: pixels per em (uint32)
    pub(super) fn op_mppem(&mut self) -> OpResult {
        self.stack.push(self.instance.ppem as i32)
    }

    /// Measure point size.
    ///
    /// MPS[] (0x4C)
    ///
    /// Pushes: pointSize: the size in points of the current glyph (F26Dot6)
    pub(super) fn op_mps(&mut self) -> OpResult {
        self.stack.push(self.instance.point_size)
    }

    /// Get information.
    ///
    /// GETINFO[] (0x88)
    ///
    /// Pops: selector: integer
    /// Pushes: result: integer
    ///
    /// Only the version and variation selectors report anything; the glyph
    /// is never rotated or stretched.
    ///
    /// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#get-information>
    pub(super) fn op_getinfo(&mut self) -> OpResult {
        use getinfo::*;
        let selector = self.stack.pop()?;
        let mut result = 0;
        // Interpreter version (selector bit: 0, result bits: 0-7)
        if (selector & VERSION_SELECTOR_BIT) != 0 {
            result = VERSION;
        }
        // Font variations (selector bit: 3, result bit: 10)
        if (selector & FONT_VARIATIONS_SELECTOR_BIT) != 0 && self.instance.axis_count != 0 {
            result |= FONT_VARIATIONS_RESULT_BIT;
        }
        self.stack.push(result)
    }

    /// Get variation.
    ///
    /// GETVARIATION[] (0x91)
    ///
    /// Pushes: one normalized coordinate per axis (F2Dot14)
    ///
    /// Coordinates are always at the default location.
    pub(super) fn op_getvariation(&mut self) -> OpResult {
        for _ in 0..self.instance.axis_count {
            self.stack.push(0)?;
        }
        Ok(())
    }

    /// Get data.
    ///
    /// GETDATA[] (0x92)
    ///
    /// Pushes: 17
    ///
    /// Undocumented. FreeType and Windows both push this constant.
    pub(super) fn op_getdata(&mut self) -> OpResult {
        self.stack.push(17)
    }

    /// Debug call.
    ///
    /// DEBUG[] (0x4F)
    ///
    /// Pops: n: integer
    pub(super) fn op_debug(&mut self) -> OpResult {
        let n = self.stack.pop()?;
        log::debug!("DEBUG[] {n}");
        Ok(())
    }

    /// Set loop variable.
    ///
    /// SLOOP[] (0x17)
    ///
    /// Pops: n: value for loop Graphics State variable (integer)
    ///
    /// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#set-loop-variable>
    pub(super) fn op_sloop(&mut self) -> OpResult {
        let n = self.stack.pop()?;
        if n < 0 {
            return Err(HintErrorKind::NegativeLoopCounter);
        }
        // As in FreeType, heuristically limit the number of loops to 16 bits.
        self.graphics.loop_counter = (n as u32).min(0xFFFF);
        Ok(())
    }
}

mod getinfo {
    /// Reported interpreter version.
    pub const VERSION: i32 = 40;

    // Interpreter version (selector bit: 0, result bits: 0-7)
    pub const VERSION_SELECTOR_BIT: i32 = 1 << 0;

    // Font variations (selector bit: 3, result bit: 10)
    pub const FONT_VARIATIONS_SELECTOR_BIT: i32 = 1 << 3;
    pub const FONT_VARIATIONS_RESULT_BIT: i32 = 1 << 10;
}
