//! Instruction dispatch by kind.

use ttf_bytecode::{Instruction, InstructionKind};

use super::{
    super::{
        definition::DefKind,
        error::{HintError, HintErrorKind},
        exec::{ExecContext, Execute},
    },
    Vm,
};

impl<'a> Vm<'a> {
    /// Executes the instruction at `index` of the running sequence.
    pub(super) fn dispatch(
        &mut self,
        program: &[Instruction<'a>],
        index: usize,
    ) -> Result<(), HintError> {
        let Some(ins) = program.get(index) else {
            return Ok(());
        };
        log::trace!("{index}: {ins}");
        let err = |kind| HintError::new(ins, kind);
        match ins.kind() {
            InstructionKind::Generic => self.dispatch_generic(program, index).map_err(err),
            InstructionKind::If => self.op_if().map_err(err),
            InstructionKind::Else => self.op_else().map_err(err),
            InstructionKind::EndIf => self.op_eif().map_err(err),
            InstructionKind::FunctionDef => self.op_def(DefKind::Function).map_err(err),
            InstructionKind::InstructionDef => self.op_def(DefKind::Instruction).map_err(err),
            InstructionKind::EndFunction => self.op_endf().map_err(err),
            InstructionKind::Call | InstructionKind::LoopCall => {
                if self.skip_or_record(ins).map_err(err)? {
                    return Ok(());
                }
                self.op_call(ins, ins.kind() == InstructionKind::LoopCall)
            }
        }
    }

    fn dispatch_generic(
        &mut self,
        program: &[Instruction<'a>],
        index: usize,
    ) -> Result<(), HintErrorKind> {
        let ins = &program[index];
        if self.skip_or_record(ins)? {
            return Ok(());
        }
        let mut ctx = ExecContext::new(
            &mut self.stack,
            &mut self.graphics,
            &mut self.storage,
            &mut self.cvt,
            &self.instance,
            &mut self.pending_jump,
            program,
            index,
        );
        ins.execute(&mut ctx)
    }

    /// Handles an instruction that is either in a skipped region or part
    /// of an open definition.
    ///
    /// Returns false if the instruction should run now.
    fn skip_or_record(&mut self, ins: &Instruction<'a>) -> Result<bool, HintErrorKind> {
        if !self.should_execute() {
            return Ok(true);
        }
        if let Some((kind, key)) = self.open_definition {
            self.definitions_mut(kind).record(key, *ins)?;
            return Ok(true);
        }
        Ok(false)
    }
}
