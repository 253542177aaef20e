//! Geometric instructions.
//!
//! Outlines are never touched so these only consume their operands and
//! produce neutral results. This covers the vector, reference point, zone,
//! movement, interpolation, delta, flipping and scan control groups.
//!
//! See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions>

use ttf_bytecode::Opcode;

use super::{ExecContext, OpResult};

/// Unit x axis vector in 2.14 notation.
const X_AXIS: (i32, i32) = (0x4000, 0);

impl ExecContext<'_, '_> {
    /// Applies the stack effect of an instruction without any other
    /// side effects.
    pub(super) fn op_stack_effect(&mut self, opcode: Opcode) -> OpResult {
        use Opcode::*;
        let (pops, pushes) = opcode.stack_effect();
        match opcode {
            // GPV[] and GFV[] report the x axis.
            GPV | GFV => {
                self.stack.push(X_AXIS.0)?;
                self.stack.push(X_AXIS.1)
            }
            DELTAP1 | DELTAP2 | DELTAP3 | DELTAC1 | DELTAC2 | DELTAC3 => self.op_delta(),
            _ if opcode.is_loop_consuming() => {
                // SHPIX[] pops its amount before the points.
                self.stack.pop_n(pops as usize)?;
                self.op_loop_points()
            }
            _ => {
                self.stack.pop_n(pops as usize)?;
                for _ in 0..pushes {
                    // GC[a] and MD[a] measure nothing.
                    self.stack.push(0)?;
                }
                Ok(())
            }
        }
    }

    /// DELTAP[123] and DELTAC[123]
    ///
    /// Pops: n: number of pairs, then n (argument, point or cvt index)
    /// pairs
    ///
    /// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#managing-exceptions>
    fn op_delta(&mut self) -> OpResult {
        let n = self.stack.pop_usize()?;
        self.stack.pop_n(n.saturating_mul(2))
    }

    /// Pops one point number per iteration of the loop counter and resets
    /// the counter.
    fn op_loop_points(&mut self) -> OpResult {
        let count = self.graphics.loop_counter as usize;
        self.graphics.loop_counter = 1;
        self.stack.pop_n(count)
    }
}
