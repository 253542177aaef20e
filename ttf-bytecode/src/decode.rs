//! TrueType bytecode decoder.

use super::{read::Cursor, InlineOperands, Instruction, Opcode};

/// Reason for a decoding failure.
#[derive(Copy, Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum DecodeErrorKind {
    #[error("unexpected end of bytecode")]
    UnexpectedEnd,
    #[error("unknown opcode {0:#04x}")]
    UnknownOpcode(u8),
}

/// An error returned when the bytecode stream is malformed.
#[derive(Copy, Clone, PartialEq, Eq, Debug, thiserror::Error)]
#[error("malformed program @{pc}: {kind}")]
pub struct DecodeError {
    /// Offset of the opcode that could not be decoded.
    pub pc: usize,
    pub kind: DecodeErrorKind,
}

/// Decodes instructions from TrueType bytecode.
#[derive(Copy, Clone)]
pub struct Decoder<'a> {
    /// The bytecode for the program.
    pub bytecode: &'a [u8],
    /// The "program counter" or current offset into the bytecode.
    pub pc: usize,
}

impl<'a> Decoder<'a> {
    /// Creates a new decoder for the given bytecode and program counter.
    pub fn new(bytecode: &'a [u8], pc: usize) -> Self {
        Self { bytecode, pc }
    }

    /// Decodes the next instruction.
    ///
    /// Returns `None` at the end of the bytecode stream.
    pub fn decode(&mut self) -> Option<Result<Instruction<'a>, DecodeError>> {
        let byte = *self.bytecode.get(self.pc)?;
        let pc = self.pc;
        let result = match Opcode::from_byte(byte) {
            Some(opcode) => self.decode_inner(opcode),
            None => Err(DecodeErrorKind::UnknownOpcode(byte)),
        };
        Some(result.map_err(|kind| DecodeError { pc, kind }))
    }

    fn decode_inner(&mut self, opcode: Opcode) -> Result<Instruction<'a>, DecodeErrorKind> {
        let pc = self.pc;
        let mut cursor = Cursor::new_at(self.bytecode, pc + 1);
        let opcode_len = opcode.len();
        // If the opcode length is negative the next byte contains the number
        // of inline operands and |opcode_len| is the size of each operand.
        // <https://gitlab.freedesktop.org/freetype/freetype/-/blob/57617782464411201ce7bbc93b086c1b4d7d84a5/src/truetype/ttinterp.c#L7046>
        let inline_size = if opcode_len < 0 {
            let inline_count = cursor
                .read_u8()
                .map_err(|_| DecodeErrorKind::UnexpectedEnd)?;
            opcode_len.unsigned_abs() as usize * inline_count as usize
        } else {
            opcode_len as usize - 1
        };
        let bytes = cursor
            .read_bytes(inline_size)
            .map_err(|_| DecodeErrorKind::UnexpectedEnd)?;
        let inline_operands = InlineOperands {
            bytes,
            is_words: opcode.is_push_words(),
        };
        self.pc = cursor.position();
        Ok(Instruction {
            opcode,
            inline_operands,
            pc,
        })
    }
}

/// Returns an iterator that yields all instructions in the given bytecode
/// starting at the specified program counter.
///
/// The iterator stops after yielding the first error.
pub fn decode_all(
    bytecode: &[u8],
    pc: usize,
) -> impl Iterator<Item = Result<Instruction<'_>, DecodeError>> + '_ + Clone {
    let mut decoder = Decoder::new(bytecode, pc);
    let mut failed = false;
    std::iter::from_fn(move || {
        if failed {
            return None;
        }
        let next = decoder.decode()?;
        failed = next.is_err();
        Some(next)
    })
}

/// Decodes an entire program into an ordered sequence of instructions.
pub fn parse(bytecode: &[u8]) -> Result<Vec<Instruction<'_>>, DecodeError> {
    decode_all(bytecode, 0).collect()
}
