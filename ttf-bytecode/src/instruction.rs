//! Decoded representation of a TrueType instruction.

use super::{read::Cursor, Opcode};

/// Decoded TrueType instruction.
///
/// Instructions are plain data: they never change after decoding and two
/// instructions decoded from the same bytes compare equal.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Instruction<'a> {
    /// Operation code.
    pub opcode: Opcode,
    /// Instruction operands that were decoded from the bytecode.
    pub inline_operands: InlineOperands<'a>,
    /// Program counter -- offset into the bytecode where this
    /// instruction was decoded.
    pub pc: usize,
}

impl Instruction<'_> {
    /// Returns the control flow category of this instruction.
    pub fn kind(&self) -> InstructionKind {
        use Opcode::*;
        match self.opcode {
            IF => InstructionKind::If,
            ELSE => InstructionKind::Else,
            EIF => InstructionKind::EndIf,
            FDEF => InstructionKind::FunctionDef,
            IDEF => InstructionKind::InstructionDef,
            ENDF => InstructionKind::EndFunction,
            CALL => InstructionKind::Call,
            LOOPCALL => InstructionKind::LoopCall,
            _ => InstructionKind::Generic,
        }
    }

    /// Returns the encoded size of this instruction in bytes.
    pub fn byte_len(&self) -> usize {
        let count_len = (self.opcode.len() < 0) as usize;
        1 + count_len + self.inline_operands.bytes.len()
    }
}

impl std::fmt::Display for Instruction<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.opcode.name())?;
        for value in self.inline_operands.values() {
            write!(f, " {value}")?;
        }
        Ok(())
    }
}

/// Category of an instruction with respect to control flow.
///
/// Everything that does not affect branching, definitions or calls is
/// [`Generic`](InstructionKind::Generic).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum InstructionKind {
    Generic,
    If,
    Else,
    EndIf,
    FunctionDef,
    InstructionDef,
    EndFunction,
    Call,
    LoopCall,
}

/// Sequence of instruction operands that are encoded directly in the bytecode.
///
/// This is only used for push instructions.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct InlineOperands<'a> {
    pub(super) bytes: &'a [u8],
    pub(super) is_words: bool,
}

impl<'a> InlineOperands<'a> {
    /// Returns the number of operands.
    #[inline]
    pub fn len(&self) -> usize {
        if self.is_words {
            self.bytes.len() / 2
        } else {
            self.bytes.len()
        }
    }

    /// Returns true if there are no operands.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the raw encoded operand bytes.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns an iterator over the operand values.
    ///
    /// Bytes are zero extended and words are sign extended.
    #[inline]
    pub fn values(&self) -> impl Iterator<Item = i32> + 'a + Clone {
        let mut cursor = Cursor::new(self.bytes);
        let is_words = self.is_words;
        std::iter::from_fn(move || {
            if is_words {
                cursor.read_i16().ok().map(|word| word as i32)
            } else {
                cursor.read_u8().ok().map(|byte| byte as i32)
            }
        })
    }
}

/// Mock for testing inline operands.
#[cfg(any(test, feature = "mock"))]
pub struct MockInlineOperands {
    bytes: Vec<u8>,
    is_words: bool,
}

#[cfg(any(test, feature = "mock"))]
impl MockInlineOperands {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.into(),
            is_words: false,
        }
    }

    pub fn from_words(words: &[i16]) -> Self {
        Self {
            bytes: words.iter().flat_map(|word| word.to_be_bytes()).collect(),
            is_words: true,
        }
    }

    pub fn operands(&self) -> InlineOperands<'_> {
        InlineOperands {
            bytes: &self.bytes,
            is_words: self.is_words,
        }
    }
}
