//! Decoding TrueType hinting bytecode
//!
//! This crate turns the raw bytes of a `fpgm`, `prep` or glyph program into
//! an ordered sequence of [`Instruction`]s. Decoding is stateless: every
//! instruction borrows its inline operands from the input buffer and the
//! same bytes always decode to the same sequence.
//!
//! Execution lives in the companion `ttf-hint` crate.
//!
//! # Example
//!
//! ```
//! use ttf_bytecode::{parse, Opcode};
//!
//! // NPUSHB[1] 1
//! let program = parse(&[0x40, 0x01, 0x01]).unwrap();
//! assert_eq!(program.len(), 1);
//! assert_eq!(program[0].opcode, Opcode::NPUSHB);
//! assert_eq!(program[0].to_string(), "NPUSHB 1");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]

mod decode;
mod instruction;
mod opcode;
pub mod read;

pub use decode::{decode_all, parse, DecodeError, DecodeErrorKind, Decoder};
pub use instruction::{InlineOperands, Instruction, InstructionKind};
pub use opcode::Opcode;

// Exported publicly for use by ttf-hint tests when the mock feature is
// enabled.
#[cfg(any(test, feature = "mock"))]
pub use instruction::MockInlineOperands;
