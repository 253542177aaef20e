//! Managing the storage area and the control value table.
//!
//! See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#managing-the-storage-area>
//! and <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#managing-the-control-value-table>

// 5 instructions

use super::{super::math, ExecContext, OpResult};

impl ExecContext<'_, '_> {
    /// Read store.
    ///
    /// RS[] (0x43)
    ///
    /// Pops: location: Storage Area location
    /// Pushes: value: Storage Area value
    pub(super) fn op_rs(&mut self) -> OpResult {
        let location = self.stack.pop_usize()?;
        let value = self.storage.get(location)?;
        self.stack.push(value)
    }

    /// Write store.
    ///
    /// WS[] (0x42)
    ///
    /// Pops: value: Storage Area value,
    ///       location: Storage Area location
    pub(super) fn op_ws(&mut self) -> OpResult {
        let value = self.stack.pop()?;
        let location = self.stack.pop_usize()?;
        self.storage.set(location, value)
    }

    /// Write control value table in pixel units.
    ///
    /// WCVTP[] (0x44)
    ///
    /// Pops: value: number in pixels (F26Dot6 fixed point number),
    ///       location: Control Value Table location
    pub(super) fn op_wcvtp(&mut self) -> OpResult {
        let value = self.stack.pop()?;
        let location = self.stack.pop_usize()?;
        self.cvt.set(location, value)
    }

    /// Write control value table in font units.
    ///
    /// WCVTF[] (0x70)
    ///
    /// Pops: value: number in font units,
    ///       location: Control Value Table location
    ///
    /// The value is scaled to pixels before it is written.
    pub(super) fn op_wcvtf(&mut self) -> OpResult {
        let value = self.stack.pop()?;
        let location = self.stack.pop_usize()?;
        self.cvt
            .set(location, math::mul(value, self.instance.scale))
    }

    /// Read control value table.
    ///
    /// RCVT[] (0x45)
    ///
    /// Pops: location: CVT entry number
    /// Pushes: value: CVT value (F26Dot6)
    pub(super) fn op_rcvt(&mut self) -> OpResult {
        let location = self.stack.pop_usize()?;
        let value = self.cvt.get(location)?;
        self.stack.push(value)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{super::HintErrorKind, MockContext};

    #[test]
    fn write_read_storage() {
        let mut mock = MockContext::new();
        let mut ctx = mock.context();
        for i in 0..8 {
            ctx.stack.push(i).unwrap();
            ctx.stack.push(i * 2).unwrap();
            ctx.op_ws().unwrap();
        }
        for i in 0..8 {
            ctx.test_exec(&[i], i * 2, |ctx| {
                ctx.op_rs().unwrap();
            });
        }
        ctx.stack.push(8).unwrap();
        assert_eq!(ctx.op_rs(), Err(HintErrorKind::InvalidStorageIndex(8)));
        ctx.stack.push(-1).unwrap();
        ctx.stack.push(0).unwrap();
        assert!(matches!(
            ctx.op_ws(),
            Err(HintErrorKind::InvalidStorageIndex(_))
        ));
    }

    #[test]
    fn write_read_cvt() {
        let mut mock = MockContext::new();
        let mut ctx = mock.context();
        ctx.test_exec(&[2], 128, |ctx| {
            ctx.op_rcvt().unwrap();
        });
        ctx.stack.push(1).unwrap();
        ctx.stack.push(-64).unwrap();
        ctx.op_wcvtp().unwrap();
        // 100 font units at a scale of 0.5
        ctx.stack.push(3).unwrap();
        ctx.stack.push(100).unwrap();
        ctx.op_wcvtf().unwrap();
        assert_eq!(ctx.cvt.values(), &[0, -64, 128, 50]);
        ctx.stack.push(4).unwrap();
        assert_eq!(ctx.op_rcvt(), Err(HintErrorKind::InvalidCvtIndex(4)));
    }
}
