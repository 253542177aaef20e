//! Execution of individual instructions.
//!
//! Everything except branching, definitions and calls runs here against an
//! explicit [`ExecContext`]. The machine builds a fresh context for each
//! instruction so instructions never hold a reference to it.

mod arith;
mod control_flow;
mod dispatch;
mod graphics;
mod logical;
mod misc;
mod round;
mod stack;
mod storage;

use ttf_bytecode::Instruction;

use super::{
    error::HintErrorKind,
    round::RoundState,
    storage::{Cvt, Storage},
    value_stack::ValueStack,
};

pub use dispatch::Execute;

pub type OpResult = Result<(), HintErrorKind>;

/// The subset of the graphics state that affects the operand stack.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct GraphicsState {
    pub round_state: RoundState,
    /// Number of times the next loop-aware instruction repeats.
    pub loop_counter: u32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            round_state: RoundState::default(),
            loop_counter: 1,
        }
    }
}

/// Parameters of the instance being hinted.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct InstanceParams {
    pub ppem: u16,
    /// 26.6
    pub point_size: i32,
    /// 16.16
    pub scale: i32,
    pub axis_count: u16,
}

/// Mutable view of the machine handed to each executing instruction.
pub struct ExecContext<'a, 'p> {
    pub stack: &'a mut ValueStack,
    pub graphics: &'a mut GraphicsState,
    pub storage: &'a mut Storage,
    pub cvt: &'a mut Cvt,
    pub instance: &'a InstanceParams,
    /// Relative instruction count requested by a forward jump. Zero when
    /// none, negative for a backward request.
    pub pending_jump: &'a mut i32,
    /// The sequence currently being driven.
    program: &'a [Instruction<'p>],
    /// Position of the executing instruction in `program`.
    index: usize,
}

impl<'a, 'p> ExecContext<'a, 'p> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        stack: &'a mut ValueStack,
        graphics: &'a mut GraphicsState,
        storage: &'a mut Storage,
        cvt: &'a mut Cvt,
        instance: &'a InstanceParams,
        pending_jump: &'a mut i32,
        program: &'a [Instruction<'p>],
        index: usize,
    ) -> Self {
        Self {
            stack,
            graphics,
            storage,
            cvt,
            instance,
            pending_jump,
            program,
            index,
        }
    }
}

/// Owned state for building contexts in tests.
#[cfg(test)]
pub(crate) struct MockContext {
    pub stack: ValueStack,
    pub graphics: GraphicsState,
    pub storage: Storage,
    pub cvt: Cvt,
    pub instance: InstanceParams,
    pub pending_jump: i32,
}

#[cfg(test)]
impl MockContext {
    pub fn new() -> Self {
        Self {
            stack: ValueStack::new(None),
            graphics: GraphicsState::default(),
            storage: Storage::new(8),
            cvt: Cvt::new(vec![0, 64, 128, 192]),
            instance: InstanceParams {
                ppem: 16,
                point_size: 12 * 64,
                scale: 1 << 15,
                axis_count: 0,
            },
            pending_jump: 0,
        }
    }

    pub fn context(&mut self) -> ExecContext<'_, 'static> {
        self.context_for(&[], 0)
    }

    pub fn context_for<'a, 'p>(
        &'a mut self,
        program: &'a [Instruction<'p>],
        index: usize,
    ) -> ExecContext<'a, 'p> {
        ExecContext::new(
            &mut self.stack,
            &mut self.graphics,
            &mut self.storage,
            &mut self.cvt,
            &self.instance,
            &mut self.pending_jump,
            program,
            index,
        )
    }
}

#[cfg(test)]
impl ExecContext<'_, '_> {
    /// Helper to push values to the stack, invoke a callback and check the
    /// expected result.
    pub(crate) fn test_exec(
        &mut self,
        inputs: &[i32],
        expected: impl Into<i32>,
        mut f: impl FnMut(&mut Self),
    ) {
        for input in inputs {
            self.stack.push(*input).unwrap();
        }
        f(self);
        assert_eq!(self.stack.pop().ok(), Some(expected.into()));
    }
}
