//! Sequential reading of big-endian program bytes.

/// An error that occurs when reading past the end of the available bytes.
#[derive(Copy, Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum ReadError {
    #[error("an offset was out of bounds")]
    OutOfBounds,
}

/// A scalar that can be read from raw big-endian bytes.
///
/// Implemented for the integer types used by the TrueType instruction
/// stream.
pub trait ReadScalar: Sized {
    /// The size of the raw type.
    const RAW_BYTE_LEN: usize;

    /// Create an instance of this type from raw big-endian bytes.
    ///
    /// Returns `None` if `bytes` is not exactly `RAW_BYTE_LEN` long.
    fn read(bytes: &[u8]) -> Option<Self>;
}

macro_rules! int_scalar {
    ($ty:ty) => {
        impl ReadScalar for $ty {
            const RAW_BYTE_LEN: usize = std::mem::size_of::<$ty>();

            #[inline]
            fn read(bytes: &[u8]) -> Option<Self> {
                bytes.try_into().ok().map(<$ty>::from_be_bytes)
            }
        }
    };
}

int_scalar!(u8);
int_scalar!(i8);
int_scalar!(u16);
int_scalar!(i16);
int_scalar!(u32);
int_scalar!(i32);

/// A cursor for reading scalars in order from a byte slice.
///
/// A failed read leaves the position unchanged.
#[derive(Copy, Clone, Debug)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor positioned at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Creates a new cursor positioned at `pos`.
    pub fn new_at(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    /// Returns the current offset into the underlying bytes.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes left to read.
    pub fn remaining_bytes(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    /// Returns true if there is nothing left to read.
    pub fn is_empty(&self) -> bool {
        self.remaining_bytes() == 0
    }

    pub fn read<T: ReadScalar>(&mut self) -> Result<T, ReadError> {
        let value = self
            .bytes
            .get(self.pos..self.pos.saturating_add(T::RAW_BYTE_LEN))
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)?;
        self.pos += T::RAW_BYTE_LEN;
        Ok(value)
    }

    pub fn read_u8(&mut self) -> Result<u8, ReadError> {
        self.read()
    }

    pub fn read_i8(&mut self) -> Result<i8, ReadError> {
        self.read()
    }

    pub fn read_u16(&mut self) -> Result<u16, ReadError> {
        self.read()
    }

    pub fn read_i16(&mut self) -> Result<i16, ReadError> {
        self.read()
    }

    /// Reads the next `len` bytes as a slice.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ReadError> {
        let bytes = self
            .bytes
            .get(self.pos..self.pos.saturating_add(len))
            .ok_or(ReadError::OutOfBounds)?;
        self.pos += len;
        Ok(bytes)
    }
}
