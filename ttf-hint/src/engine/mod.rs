//! TrueType interpreter engine.

mod control_flow;
mod definition;
mod dispatch;

use ttf_bytecode::Instruction;

use super::{
    definition::{DefKind, FunctionRegistry},
    error::{HintError, HintErrorKind},
    exec::{GraphicsState, InstanceParams},
    options::VmOptions,
    storage::{Cvt, Storage},
    summary::{DefinitionSummary, RunSummary},
    value_stack::ValueStack,
};

/// Record of one open conditional region.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BranchFrame {
    pub should_execute: bool,
}

/// Virtual machine for TrueType hinting programs.
///
/// A machine may execute several sequences in turn, typically the font
/// program, the control value program and then glyph programs. Functions
/// and all other state carry over from one sequence to the next.
///
/// Function bodies borrow from the bytecode they were decoded from, hence
/// the lifetime.
#[derive(Clone, Debug)]
pub struct Vm<'a> {
    stack: ValueStack,
    graphics: GraphicsState,
    storage: Storage,
    cvt: Cvt,
    instance: InstanceParams,
    branches: Vec<BranchFrame>,
    /// Number of `IF`s seen inside a skipped region that are still open.
    discard_depth: usize,
    open_definition: Option<(DefKind, i32)>,
    functions: FunctionRegistry<'a>,
    instruction_defs: FunctionRegistry<'a>,
    /// Relative instruction count requested by the last jump.
    pending_jump: i32,
    call_depth: usize,
    max_call_depth: usize,
    instruction_count: usize,
    max_instructions: usize,
}

impl<'a> Vm<'a> {
    pub fn new(options: VmOptions) -> Self {
        let instance = InstanceParams {
            ppem: options.ppem,
            point_size: options.point_size,
            scale: options.scale,
            axis_count: options.axis_count,
        };
        Self {
            stack: ValueStack::new(options.max_stack_depth),
            graphics: GraphicsState::default(),
            storage: Storage::new(options.max_storage),
            cvt: Cvt::new(options.cvt),
            instance,
            branches: Vec::new(),
            discard_depth: 0,
            open_definition: None,
            functions: FunctionRegistry::new(options.max_function_defs),
            instruction_defs: FunctionRegistry::new(options.max_instruction_defs),
            pending_jump: 0,
            call_depth: 0,
            max_call_depth: options.max_call_depth,
            instruction_count: 0,
            max_instructions: options.max_instructions,
        }
    }

    /// Runs the given instruction sequence to completion or until the first
    /// error.
    ///
    /// Function definitions are discovered while running: `FDEF[]` and
    /// `ENDF[]` delimit bodies that are recorded, not executed, and become
    /// callable once closed.
    pub fn execute(&mut self, program: &[Instruction<'a>]) -> Result<(), HintError> {
        self.instruction_count = 0;
        self.pending_jump = 0;
        let result = self.run_sequence(program);
        if let Err(e) = &result {
            log::debug!("execution stopped: {e}");
        }
        result
    }

    /// Drives a sequence, honoring forward jumps between instructions.
    fn run_sequence(&mut self, program: &[Instruction<'a>]) -> Result<(), HintError> {
        let mut index = 0;
        while let Some(ins) = program.get(index) {
            self.charge_budget().map_err(|kind| HintError::new(ins, kind))?;
            self.dispatch(program, index)?;
            let jump = std::mem::take(&mut self.pending_jump);
            if jump > 0 {
                log::debug!("jump from {index} by {jump} instructions");
                index += jump as usize - 1;
            } else if jump < 0 {
                log::debug!("ignored backward jump from {index} by {jump} bytes");
            }
            index += 1;
        }
        Ok(())
    }

    /// Counts one unit of work against the execution budget.
    ///
    /// Every dispatched instruction and every `LOOPCALL[]` iteration is
    /// charged, so replaying empty bodies is bounded too.
    fn charge_budget(&mut self) -> Result<(), HintErrorKind> {
        self.instruction_count += 1;
        if self.instruction_count > self.max_instructions {
            return Err(HintErrorKind::ExceededExecutionBudget);
        }
        Ok(())
    }

    /// Returns the operand stack.
    pub fn stack(&self) -> &ValueStack {
        &self.stack
    }

    /// Returns the registry of function definitions.
    pub fn functions(&self) -> &FunctionRegistry<'a> {
        &self.functions
    }

    /// Returns the registry of instruction definitions.
    pub fn instruction_defs(&self) -> &FunctionRegistry<'a> {
        &self.instruction_defs
    }

    /// Returns the number of open branch frames.
    pub fn branch_depth(&self) -> usize {
        self.branches.len()
    }

    /// Returns the number of `IF`s inside skipped regions that are still
    /// open.
    pub fn discard_depth(&self) -> usize {
        self.discard_depth
    }

    /// Returns the definition currently being recorded, if any.
    pub fn open_definition(&self) -> Option<(DefKind, i32)> {
        self.open_definition
    }

    /// Returns the storage area.
    pub fn storage(&self) -> &[i32] {
        self.storage.values()
    }

    /// Returns the control value table in 26.6 pixels.
    pub fn cvt(&self) -> &[i32] {
        self.cvt.values()
    }

    /// Returns the round state and loop counter.
    pub fn graphics(&self) -> &GraphicsState {
        &self.graphics
    }

    /// Captures the observable state of the machine.
    pub fn summary(&self) -> RunSummary {
        let definitions = |registry: &FunctionRegistry<'a>| -> Vec<DefinitionSummary> {
            registry
                .iter()
                .map(|(key, def)| DefinitionSummary {
                    key,
                    len: def.len(),
                    is_closed: def.is_closed(),
                })
                .collect()
        };
        RunSummary {
            stack: self.stack.values().to_vec(),
            functions: definitions(&self.functions),
            instruction_defs: definitions(&self.instruction_defs),
            storage: self.storage.values().to_vec(),
            cvt: self.cvt.values().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        super::{
            error::{ControlFlowError, HintError, HintErrorKind},
            options::VmOptions,
        },
        Vm,
    };
    use pretty_assertions::assert_eq;
    use ttf_bytecode::{parse, Opcode};

    fn run_with(bytecode: &[u8], options: VmOptions) -> (Vm<'_>, Result<(), HintError>) {
        let program = parse(bytecode).unwrap();
        let mut vm = Vm::new(options);
        let result = vm.execute(&program);
        (vm, result)
    }

    fn run(bytecode: &[u8]) -> (Vm<'_>, Result<(), HintError>) {
        run_with(bytecode, VmOptions::default())
    }

    fn error_kind(bytecode: &[u8]) -> HintErrorKind {
        run(bytecode).1.unwrap_err().kind
    }

    #[test]
    fn push_n_bytes() {
        let (vm, result) = run(&[0x40, 0x01, 0x01]);
        result.unwrap();
        assert_eq!(vm.stack().peek(), Some(1));
        assert_eq!(vm.stack().len(), 1);
    }

    #[test]
    fn if_end_if_restores_depth() {
        // PUSHB[0] 1, IF, EIF
        let (vm, result) = run(&[0xB0, 1, 0x58, 0x59]);
        result.unwrap();
        assert_eq!(vm.branch_depth(), 0);
        assert_eq!(vm.discard_depth(), 0);
        assert!(vm.stack().is_empty());
    }

    #[test]
    fn false_branch_runs_else() {
        // PUSHB[0] 0, IF, PUSHB[0] 5, ELSE, PUSHB[0] 6, EIF
        let (vm, result) = run(&[0xB0, 0, 0x58, 0xB0, 5, 0x1B, 0xB0, 6, 0x59]);
        result.unwrap();
        assert_eq!(vm.stack().values(), &[6]);
        // PUSHB[0] 1, IF, PUSHB[0] 5, ELSE, PUSHB[0] 6, EIF
        let (vm, result) = run(&[0xB0, 1, 0x58, 0xB0, 5, 0x1B, 0xB0, 6, 0x59]);
        result.unwrap();
        assert_eq!(vm.stack().values(), &[5]);
    }

    #[test]
    fn skipped_if_is_counted() {
        // PUSHB[0] 0, IF, IF, EIF
        let (vm, result) = run(&[0xB0, 0, 0x58, 0x58, 0x59]);
        result.unwrap();
        assert_eq!(vm.branch_depth(), 1);
        assert_eq!(vm.discard_depth(), 0);
        // PUSHB[0] 0, IF, IF, IF
        let (vm, result) = run(&[0xB0, 0, 0x58, 0x58, 0x58]);
        result.unwrap();
        assert_eq!(vm.branch_depth(), 1);
        assert_eq!(vm.discard_depth(), 2);
    }

    #[test]
    fn else_in_skipped_if_flips_enclosing_frame() {
        // PUSHB[0] 0, IF, IF, ELSE, PUSHB[0] 42, EIF, EIF
        let (vm, result) = run(&[0xB0, 0, 0x58, 0x58, 0x1B, 0xB0, 42, 0x59, 0x59]);
        result.unwrap();
        assert_eq!(vm.stack().values(), &[42]);
        assert_eq!(vm.branch_depth(), 0);
        assert_eq!(vm.discard_depth(), 0);
    }

    #[test]
    fn unmatched_else() {
        let (_, result) = run(&[0x1B]);
        let err = result.unwrap_err();
        assert_eq!(
            err.kind,
            HintErrorKind::RuntimeState(ControlFlowError::UnmatchedElse)
        );
        assert_eq!(err.kind.to_string(), "Else with no matching If");
        assert_eq!(err.opcode, Some(Opcode::ELSE));
        assert_eq!(err.pc, 0);
    }

    #[test]
    fn unmatched_end_if() {
        // PUSHB[0] 1, EIF
        let (_, result) = run(&[0xB0, 1, 0x59]);
        let err = result.unwrap_err();
        assert_eq!(err.kind.to_string(), "End If with no matching If");
        assert_eq!(err.to_string(), "@2:EIF: End If with no matching If");
    }

    #[test]
    fn unmatched_end_function() {
        assert_eq!(
            error_kind(&[0x2D]).to_string(),
            "End function with no matching function-definition start"
        );
    }

    #[test]
    fn if_without_condition() {
        assert_eq!(error_kind(&[0x58]), HintErrorKind::StackUnderflow);
    }

    #[test]
    fn function_definition_records_body() {
        // PUSHB[0] 3, FDEF, PUSHB[0] 7, DUP, ENDF
        let bytecode = [0xB0, 3, 0x2C, 0xB0, 7, 0x20, 0x2D];
        let program = parse(&bytecode).unwrap();
        let (vm, result) = run(&bytecode);
        result.unwrap();
        let def = vm.functions().get(3).unwrap();
        assert_eq!(def.instructions(), &program[2..4]);
        assert!(vm.stack().is_empty());
        assert_eq!(vm.open_definition(), None);
    }

    #[test]
    fn instruction_definition() {
        // PUSHB[0] 0x93, IDEF, PUSHB[0] 1, ENDF
        let (vm, result) = run(&[0xB0, 0x93, 0x89, 0xB0, 1, 0x2D]);
        result.unwrap();
        assert!(vm.functions().is_empty());
        assert_eq!(vm.instruction_defs().get(0x93).unwrap().len(), 1);
    }

    #[test]
    fn nested_definition_leaves_outer_open() {
        // PUSHB[1] 1 2, FDEF, FDEF, ENDF
        let (vm, result) = run(&[0xB1, 1, 2, 0x2C, 0x2C, 0x2D]);
        result.unwrap();
        assert!(vm.functions().get(1).is_ok());
        assert_eq!(
            vm.functions().get(2),
            Err(HintErrorKind::UndefinedFunction(2))
        );
        assert!(!vm.functions().get_any(2).unwrap().is_closed());
    }

    #[test]
    fn definitions_ignore_branch_state() {
        // PUSHB[1] 2 0, IF, FDEF, PUSHB[0] 9, EIF, ENDF
        let (vm, result) = run(&[0xB1, 2, 0, 0x58, 0x2C, 0xB0, 9, 0x59, 0x2D]);
        result.unwrap();
        // the push was skipped, not recorded
        assert!(vm.functions().get(2).unwrap().is_empty());
        assert!(vm.stack().is_empty());
    }

    #[test]
    fn forward_jump_skips_instructions() {
        // PUSHB[0] 3, JMPR, PUSHB[0] 9, PUSHB[0] 5
        let (vm, result) = run(&[0xB0, 3, 0x1C, 0xB0, 9, 0xB0, 5]);
        result.unwrap();
        assert_eq!(vm.stack().values(), &[5]);
    }

    #[test]
    fn jump_past_end() {
        // PUSHB[0] 3, JMPR, PUSHB[0] 9
        let (vm, result) = run(&[0xB0, 3, 0x1C, 0xB0, 9]);
        result.unwrap();
        assert!(vm.stack().is_empty());
    }

    #[test]
    fn zero_jump_is_ignored() {
        // PUSHB[0] 0, JMPR, PUSHB[0] 7
        let (vm, result) = run(&[0xB0, 0, 0x1C, 0xB0, 7]);
        result.unwrap();
        assert_eq!(vm.stack().values(), &[7]);
    }

    #[test]
    fn backward_jump_is_ignored() {
        // PUSHB[0] 7, PUSHW[0] -3, JMPR, PUSHB[0] 8
        let (vm, result) = run(&[0xB0, 7, 0xB8, 0xFF, 0xFD, 0x1C, 0xB0, 8]);
        result.unwrap();
        assert_eq!(vm.stack().values(), &[7, 8]);
    }

    #[test]
    fn jump_to_operand_byte() {
        // PUSHB[0] 2, JMPR, PUSHB[0] 9
        let (_, result) = run(&[0xB0, 2, 0x1C, 0xB0, 9]);
        let err = result.unwrap_err();
        assert_eq!(err.kind, HintErrorKind::InvalidJump);
        assert_eq!(err.pc, 2);
    }

    #[test]
    fn call_function() {
        // PUSHB[0] 1, FDEF, PUSHB[0] 64, ADD, ENDF, PUSHB[1] 0 1, CALL
        let (vm, result) = run(&[0xB0, 1, 0x2C, 0xB0, 64, 0x60, 0x2D, 0xB1, 0, 1, 0x2B]);
        result.unwrap();
        assert_eq!(vm.stack().values(), &[64]);
    }

    #[test]
    fn loop_call_function() {
        // PUSHB[0] 1, FDEF, PUSHB[0] 64, ADD, ENDF, PUSHB[2] 0 3 1, LOOPCALL
        let (vm, result) = run(&[
            0xB0, 1, 0x2C, 0xB0, 64, 0x60, 0x2D, 0xB2, 0, 3, 1, 0x2A,
        ]);
        result.unwrap();
        assert_eq!(vm.stack().values(), &[192]);
        // A count of zero pops both operands and does nothing
        // PUSHB[0] 1, FDEF, PUSHB[0] 64, ADD, ENDF, PUSHB[2] 0 0 1, LOOPCALL
        let (vm, result) = run(&[
            0xB0, 1, 0x2C, 0xB0, 64, 0x60, 0x2D, 0xB2, 0, 0, 1, 0x2A,
        ]);
        result.unwrap();
        assert_eq!(vm.stack().values(), &[0]);
    }

    #[test]
    fn calls_are_recorded_in_definitions() {
        // PUSHB[0] 1, FDEF, PUSHB[0] 2, ENDF,
        // PUSHB[0] 2, FDEF, PUSHB[0] 1, CALL, ENDF, PUSHB[0] 2, CALL
        let (vm, result) = run(&[
            0xB0, 1, 0x2C, 0xB0, 2, 0x2D, 0xB0, 2, 0x2C, 0xB0, 1, 0x2B, 0x2D, 0xB0, 2, 0x2B,
        ]);
        result.unwrap();
        assert_eq!(vm.functions().get(2).unwrap().len(), 2);
        assert_eq!(vm.stack().values(), &[2]);
    }

    #[test]
    fn skipped_call() {
        // PUSHB[0] 0, IF, PUSHB[0] 5, CALL, EIF
        let (vm, result) = run(&[0xB0, 0, 0x58, 0xB0, 5, 0x2B, 0x59]);
        result.unwrap();
        assert!(vm.stack().is_empty());
    }

    #[test]
    fn undefined_function() {
        // PUSHB[0] 9, CALL
        let (_, result) = run(&[0xB0, 9, 0x2B]);
        let err = result.unwrap_err();
        assert_eq!(err.kind, HintErrorKind::UndefinedFunction(9));
        assert_eq!(err.opcode, Some(Opcode::CALL));
    }

    #[test]
    fn unbounded_recursion() {
        // PUSHB[0] 0, FDEF, PUSHB[0] 0, CALL, ENDF, PUSHB[0] 0, CALL
        let (vm, result) = run(&[0xB0, 0, 0x2C, 0xB0, 0, 0x2B, 0x2D, 0xB0, 0, 0x2B]);
        assert_eq!(result.unwrap_err().kind, HintErrorKind::CallStackOverflow);
        assert_eq!(vm.call_depth, 0);
    }

    #[test]
    fn execution_budget() {
        let options = VmOptions {
            max_instructions: 3,
            ..Default::default()
        };
        // DEPTH x4
        let (_, result) = run_with(&[0x24, 0x24, 0x24, 0x24], options);
        let err = result.unwrap_err();
        assert_eq!(err.kind, HintErrorKind::ExceededExecutionBudget);
        assert_eq!(err.pc, 3);
    }

    #[test]
    fn execution_budget_counts_loop_calls() {
        let options = VmOptions {
            max_instructions: 20,
            ..Default::default()
        };
        // PUSHB[0] 0, FDEF, ENDF, PUSHW[1] 32767 32767, MUL, PUSHB[0] 0,
        // LOOPCALL
        // The empty body is replayed about 16 million times unless each
        // iteration is charged.
        let (_, result) = run_with(
            &[
                0xB0, 0, 0x2C, 0x2D, 0xB9, 0x7F, 0xFF, 0x7F, 0xFF, 0x63, 0xB0, 0, 0x2A,
            ],
            options,
        );
        let err = result.unwrap_err();
        assert_eq!(err.kind, HintErrorKind::ExceededExecutionBudget);
        assert_eq!(err.pc, 12);
        assert_eq!(err.opcode, Some(Opcode::LOOPCALL));
    }

    #[test]
    fn jumps_in_bodies_resolve_against_recorded_instructions() {
        // PUSHB[1] 1 0, FDEF, PUSHB[0] 3, JMPR, IF, EIF, PUSHB[0] 9, ENDF,
        // PUSHB[0] 0, CALL
        // IF and EIF run while the body is recorded so the jump lands on
        // the next recorded instruction.
        let (vm, result) = run(&[
            0xB1, 1, 0, 0x2C, 0xB0, 3, 0x1C, 0x58, 0x59, 0xB0, 9, 0x2D, 0xB0, 0, 0x2B,
        ]);
        result.unwrap();
        assert_eq!(vm.functions().get(0).unwrap().len(), 3);
        assert_eq!(vm.stack().values(), &[9]);
        // Same body jumping to the IF, which is not part of it
        let (_, result) = run(&[
            0xB1, 1, 0, 0x2C, 0xB0, 1, 0x1C, 0x58, 0x59, 0xB0, 9, 0x2D, 0xB0, 0, 0x2B,
        ]);
        let err = result.unwrap_err();
        assert_eq!(err.kind, HintErrorKind::InvalidJump);
        assert_eq!(err.pc, 6);
        assert_eq!(err.opcode, Some(Opcode::JMPR));
    }

    #[test]
    fn definition_limit() {
        let options = VmOptions {
            max_function_defs: Some(1),
            ..Default::default()
        };
        // PUSHB[0] 0, FDEF, ENDF, PUSHB[0] 1, FDEF, ENDF
        let (vm, result) = run_with(&[0xB0, 0, 0x2C, 0x2D, 0xB0, 1, 0x2C, 0x2D], options);
        assert_eq!(result.unwrap_err().kind, HintErrorKind::TooManyDefinitions);
        assert_eq!(vm.functions().keys(), vec![0]);
    }

    #[test]
    fn stack_limit() {
        let options = VmOptions {
            max_stack_depth: Some(2),
            ..Default::default()
        };
        // PUSHB[2] 1 2 3
        let (_, result) = run_with(&[0xB2, 1, 2, 3], options);
        assert_eq!(result.unwrap_err().kind, HintErrorKind::StackOverflow);
    }

    #[test]
    fn state_carries_across_runs() {
        // font program: PUSHB[0] 0, FDEF, PUSHB[1] 1 64, WS, ENDF
        let fpgm = parse(&[0xB0, 0, 0x2C, 0xB1, 1, 64, 0x42, 0x2D]).unwrap();
        // glyph program: PUSHB[0] 0, CALL, PUSHB[0] 1, RS
        let glyph = parse(&[0xB0, 0, 0x2B, 0xB0, 1, 0x43]).unwrap();
        let mut vm = Vm::new(VmOptions::default());
        vm.execute(&fpgm).unwrap();
        vm.execute(&glyph).unwrap();
        assert_eq!(vm.stack().values(), &[64]);
        assert_eq!(vm.storage()[1], 64);
    }

    #[test]
    fn summary() {
        // PUSHB[0] 4, FDEF, POP, ENDF, PUSHB[0] 9
        let options = VmOptions::default().with_cvt(vec![64]);
        let (vm, result) = run_with(&[0xB0, 4, 0x2C, 0x21, 0x2D, 0xB0, 9], options);
        result.unwrap();
        let summary = vm.summary();
        assert_eq!(summary.stack, vec![9]);
        assert_eq!(summary.functions.len(), 1);
        assert_eq!(summary.functions[0].key, 4);
        assert_eq!(summary.functions[0].len, 1);
        assert!(summary.instruction_defs.is_empty());
        assert_eq!(summary.cvt, vec![64]);
    }
}
