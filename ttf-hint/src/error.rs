//! Hinting error definitions.

use ttf_bytecode::{DecodeError, DecodeErrorKind, Instruction, Opcode};

/// Structural misuse of the branch or definition markers.
#[derive(Copy, Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum ControlFlowError {
    #[error("Else with no matching If")]
    UnmatchedElse,
    #[error("End If with no matching If")]
    UnmatchedEndIf,
    #[error("End function with no matching function-definition start")]
    UnmatchedEndFunction,
}

/// Errors that may occur when interpreting TrueType bytecode.
#[derive(Copy, Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum HintErrorKind {
    #[error("malformed program: {0}")]
    MalformedProgram(DecodeErrorKind),
    #[error("value stack underflow")]
    StackUnderflow,
    #[error("value stack overflow")]
    StackOverflow,
    #[error("{0}")]
    RuntimeState(ControlFlowError),
    #[error("function or instruction definition {0} not found")]
    UndefinedFunction(i32),
    #[error("too many function or instruction definitions")]
    TooManyDefinitions,
    #[error("call stack overflow")]
    CallStackOverflow,
    #[error("attempt to divide by 0")]
    DivideByZero,
    #[error("storage area index {0} was out of bounds")]
    InvalidStorageIndex(usize),
    #[error("cvt index {0} was out of bounds")]
    InvalidCvtIndex(usize),
    #[error("attempt to set the loop counter to a negative value")]
    NegativeLoopCounter,
    #[error("the target of a jump instruction was invalid")]
    InvalidJump,
    #[error("too many instructions executed")]
    ExceededExecutionBudget,
}

impl From<ControlFlowError> for HintErrorKind {
    fn from(value: ControlFlowError) -> Self {
        Self::RuntimeState(value)
    }
}

/// Hinting error with additional context.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct HintError {
    /// Offset in the bytecode of the failing instruction.
    pub pc: usize,
    /// Opcode of the failing instruction, if one was decoded.
    pub opcode: Option<Opcode>,
    pub kind: HintErrorKind,
}

impl HintError {
    pub(crate) fn new(ins: &Instruction, kind: HintErrorKind) -> Self {
        Self {
            pc: ins.pc,
            opcode: Some(ins.opcode),
            kind,
        }
    }
}

impl From<DecodeError> for HintError {
    fn from(value: DecodeError) -> Self {
        Self {
            pc: value.pc,
            opcode: None,
            kind: HintErrorKind::MalformedProgram(value.kind),
        }
    }
}

impl std::fmt::Display for HintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (opcode, colon) = match self.opcode {
            Some(opcode) => (opcode.name(), ":"),
            _ => ("", ""),
        };
        write!(f, "@{}:{opcode}{colon} {}", self.pc, self.kind)
    }
}

impl std::error::Error for HintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}
