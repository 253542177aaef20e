//! Defining and using functions and instructions.
//!
//! Implements 5 instructions.
//!
//! See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#defining-and-using-functions-and-instructions>

use ttf_bytecode::Instruction;

use super::{
    super::{
        definition::{DefKind, FunctionRegistry},
        error::{ControlFlowError, HintError, HintErrorKind},
    },
    Vm,
};

impl<'a> Vm<'a> {
    /// Function or instruction definition.
    ///
    /// FDEF[] (0x2C) and IDEF[] (0x89)
    ///
    /// Pops: f: function identifier number or opcode
    ///
    /// Opens a new definition that captures every following instruction up
    /// to `ENDF[]`. This runs regardless of the branch state and does not
    /// close a definition that is already open.
    ///
    /// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#function-definition>
    pub(super) fn op_def(&mut self, kind: DefKind) -> Result<(), HintErrorKind> {
        let key = self.stack.pop()?;
        self.definitions_mut(kind).insert(key)?;
        if let Some((open_kind, open_key)) = self.open_definition {
            log::debug!("{open_kind:?} {open_key} left open by nested definition");
        }
        log::debug!("opened {kind:?} {key}");
        self.open_definition = Some((kind, key));
        Ok(())
    }

    /// End function definition.
    ///
    /// ENDF[] (0x2D)
    ///
    /// Marks the end of a function definition or an instruction definition.
    pub(super) fn op_endf(&mut self) -> Result<(), HintErrorKind> {
        let (kind, key) = self
            .open_definition
            .take()
            .ok_or(ControlFlowError::UnmatchedEndFunction)?;
        self.definitions_mut(kind).close(key)?;
        log::debug!("closed {kind:?} {key}");
        Ok(())
    }

    /// Call function and loop and call function.
    ///
    /// CALL[] (0x2B)
    ///
    /// Pops: f: function identifier number
    ///
    /// LOOPCALL[] (0x2A)
    ///
    /// Pops: f: function identifier number, count: number of times to call
    /// the function
    ///
    /// The recorded body is replayed through the driving loop so it sees the
    /// same branch, definition and jump handling as top level code.
    ///
    /// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#call-function>
    pub(super) fn op_call(
        &mut self,
        ins: &Instruction<'a>,
        is_loop: bool,
    ) -> Result<(), HintError> {
        let err = |kind| HintError::new(ins, kind);
        let f = self.stack.pop().map_err(err)?;
        let count = if is_loop {
            self.stack.pop().map_err(err)?
        } else {
            1
        };
        if count <= 0 {
            return Ok(());
        }
        let body = self.functions.get(f).map_err(err)?.instructions().to_vec();
        if self.call_depth >= self.max_call_depth {
            return Err(err(HintErrorKind::CallStackOverflow));
        }
        log::debug!("calling function {f} x{count} at depth {}", self.call_depth);
        self.call_depth += 1;
        let result = (0..count).try_for_each(|_| {
            self.charge_budget().map_err(err)?;
            self.run_sequence(&body)
        });
        self.call_depth -= 1;
        result
    }

    pub(super) fn definitions_mut(&mut self, kind: DefKind) -> &mut FunctionRegistry<'a> {
        match kind {
            DefKind::Function => &mut self.functions,
            DefKind::Instruction => &mut self.instruction_defs,
        }
    }
}
