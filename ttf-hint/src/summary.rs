//! Observable machine state after a run.

/// Size and state of one recorded definition.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefinitionSummary {
    /// Function number or opcode.
    pub key: i32,
    /// Number of recorded instructions.
    pub len: usize,
    pub is_closed: bool,
}

/// Snapshot of the state left behind by [`Vm::execute`](crate::Vm::execute).
#[derive(Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// Operand stack, bottom first.
    pub stack: Vec<i32>,
    /// Function definitions in ascending key order.
    pub functions: Vec<DefinitionSummary>,
    /// Instruction definitions in ascending key order.
    pub instruction_defs: Vec<DefinitionSummary>,
    pub storage: Vec<i32>,
    pub cvt: Vec<i32>,
}
