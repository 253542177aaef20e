//! Storage area and control value table.

use super::error::HintErrorKind;

/// Fixed size storage area addressed by `WS[]` and `RS[]`.
///
/// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#managing-the-storage-area>
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Storage {
    values: Vec<i32>,
}

impl Storage {
    /// Creates a zero filled storage area with `len` slots.
    pub fn new(len: usize) -> Self {
        Self {
            values: vec![0; len],
        }
    }

    pub fn get(&self, index: usize) -> Result<i32, HintErrorKind> {
        self.values
            .get(index)
            .copied()
            .ok_or(HintErrorKind::InvalidStorageIndex(index))
    }

    pub fn set(&mut self, index: usize, value: i32) -> Result<(), HintErrorKind> {
        *self
            .values
            .get_mut(index)
            .ok_or(HintErrorKind::InvalidStorageIndex(index))? = value;
        Ok(())
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }
}

/// Control value table in 26.6 pixel units.
///
/// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#managing-the-control-value-table>
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Cvt {
    values: Vec<i32>,
}

impl Cvt {
    pub fn new(values: Vec<i32>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Result<i32, HintErrorKind> {
        self.values
            .get(index)
            .copied()
            .ok_or(HintErrorKind::InvalidCvtIndex(index))
    }

    pub fn set(&mut self, index: usize, value: i32) -> Result<(), HintErrorKind> {
        *self
            .values
            .get_mut(index)
            .ok_or(HintErrorKind::InvalidCvtIndex(index))? = value;
        Ok(())
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }
}
