//! An interpreter for TrueType hinting bytecode
//!
//! This crate executes the instruction sequences produced by
//! [`ttf_bytecode::parse`] on a small stack machine. It tracks nested
//! conditionals, discovers function and instruction definitions while
//! running, replays them on `CALL[]`/`LOOPCALL[]` and honors relative
//! forward jumps.
//!
//! Outlines are never modified: geometric instructions consume their
//! operands and leave neutral results so that the stack, storage area and
//! control value table evolve as they would in a full rasterizer.
//!
//! # Example
//!
//! ```
//! use ttf_hint::{run_program, VmOptions};
//!
//! // PUSHB[0] 1, FDEF, PUSHB[0] 64, ADD, ENDF, PUSHB[1] 0 1, CALL
//! let bytecode = [0xB0, 1, 0x2C, 0xB0, 64, 0x60, 0x2D, 0xB1, 0, 1, 0x2B];
//! let vm = run_program(&bytecode, VmOptions::default()).unwrap();
//! assert_eq!(vm.stack().values(), &[64]);
//! assert_eq!(vm.functions().get(1).unwrap().len(), 2);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]

mod definition;
mod engine;
mod error;
mod exec;
mod math;
mod options;
mod round;
mod storage;
mod summary;
mod value_stack;

pub use definition::{DefKind, Function, FunctionRegistry};
pub use engine::{BranchFrame, Vm};
pub use error::{ControlFlowError, HintError, HintErrorKind};
pub use exec::{ExecContext, Execute, GraphicsState, InstanceParams};
pub use options::{
    MaxProfile, VmOptions, DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_INSTRUCTIONS, DEFAULT_MAX_STORAGE,
};
pub use round::{RoundMode, RoundState};
pub use storage::{Cvt, Storage};
pub use summary::{DefinitionSummary, RunSummary};
pub use value_stack::ValueStack;

use ttf_bytecode::parse;

/// Parses and executes a program on a fresh machine.
///
/// Decoding failures are reported as
/// [`HintErrorKind::MalformedProgram`].
pub fn run_program(bytecode: &[u8], options: VmOptions) -> Result<Vm<'_>, HintError> {
    let program = parse(bytecode)?;
    let mut vm = Vm::new(options);
    vm.execute(&program)?;
    Ok(vm)
}

#[cfg(test)]
mod tests {
    use super::{run_program, HintErrorKind, VmOptions};
    use ttf_bytecode::DecodeErrorKind;

    #[test]
    fn malformed_programs() {
        // NPUSHW[2] with a truncated second word
        let err = run_program(&[0x41, 2, 0, 1, 0], VmOptions::default()).unwrap_err();
        assert_eq!(
            err.kind,
            HintErrorKind::MalformedProgram(DecodeErrorKind::UnexpectedEnd)
        );
        assert_eq!(err.opcode, None);
        let err = run_program(&[0x20, 0x7B], VmOptions::default()).unwrap_err();
        assert_eq!(
            err.kind,
            HintErrorKind::MalformedProgram(DecodeErrorKind::UnknownOpcode(0x7B))
        );
        assert_eq!(err.pc, 1);
    }

    #[test]
    fn parse_errors_precede_execution() {
        // CLEAR then an unknown opcode: nothing runs
        let err = run_program(&[0x22, 0x1B, 0x28], VmOptions::default()).unwrap_err();
        assert!(matches!(err.kind, HintErrorKind::MalformedProgram(_)));
    }
}
