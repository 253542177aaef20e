//! Management of function and instruction definitions.

use std::collections::HashMap;

use ttf_bytecode::Instruction;

use super::error::HintErrorKind;

/// Distinguishes the two registries that share the definition machinery.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DefKind {
    /// Created by `FDEF[]`, keyed by function number.
    Function,
    /// Created by `IDEF[]`, keyed by opcode.
    Instruction,
}

/// A function or instruction definition discovered during execution.
///
/// The body is recorded verbatim while the definition is open and never
/// changes once it has been closed by `ENDF[]`.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Function<'a> {
    instructions: Vec<Instruction<'a>>,
    is_closed: bool,
}

impl<'a> Function<'a> {
    /// Returns the recorded body.
    pub fn instructions(&self) -> &[Instruction<'a>] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Returns true if `ENDF[]` has been seen for this definition.
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }
}

/// Map of function number or opcode to recorded definitions.
#[derive(Clone, Default, Debug)]
pub struct FunctionRegistry<'a> {
    defs: HashMap<i32, Function<'a>>,
    max_definitions: Option<usize>,
}

impl<'a> FunctionRegistry<'a> {
    /// Creates an empty registry that accepts at most `max_definitions`
    /// distinct keys.
    pub fn new(max_definitions: Option<usize>) -> Self {
        Self {
            defs: HashMap::new(),
            max_definitions,
        }
    }

    /// Starts a fresh, open definition for `key`.
    ///
    /// Any existing definition with the same key is replaced.
    pub fn insert(&mut self, key: i32) -> Result<(), HintErrorKind> {
        if let Some(max) = self.max_definitions {
            if !self.defs.contains_key(&key) && self.defs.len() >= max {
                return Err(HintErrorKind::TooManyDefinitions);
            }
        }
        self.defs.insert(key, Function::default());
        Ok(())
    }

    /// Appends an instruction to the open definition for `key`.
    pub fn record(&mut self, key: i32, ins: Instruction<'a>) -> Result<(), HintErrorKind> {
        match self.defs.get_mut(&key) {
            Some(def) if !def.is_closed => {
                def.instructions.push(ins);
                Ok(())
            }
            _ => Err(HintErrorKind::UndefinedFunction(key)),
        }
    }

    /// Finalizes the definition for `key`.
    pub fn close(&mut self, key: i32) -> Result<(), HintErrorKind> {
        let def = self
            .defs
            .get_mut(&key)
            .ok_or(HintErrorKind::UndefinedFunction(key))?;
        def.is_closed = true;
        Ok(())
    }

    /// Returns the closed definition for `key`.
    pub fn get(&self, key: i32) -> Result<&Function<'a>, HintErrorKind> {
        self.defs
            .get(&key)
            .filter(|def| def.is_closed)
            .ok_or(HintErrorKind::UndefinedFunction(key))
    }

    /// Returns the definition for `key`, even if it is still open.
    pub fn get_any(&self, key: i32) -> Option<&Function<'a>> {
        self.defs.get(&key)
    }

    pub fn contains(&self, key: i32) -> bool {
        self.defs.contains_key(&key)
    }

    /// Returns the number of registered definitions, open or closed.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Returns the registered keys in ascending order.
    pub fn keys(&self) -> Vec<i32> {
        let mut keys: Vec<_> = self.defs.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Returns an iterator over all definitions in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &Function<'a>)> + '_ {
        self.keys()
            .into_iter()
            .filter_map(move |key| self.defs.get(&key).map(|def| (key, def)))
    }
}

#[cfg(test)]
mod tests {
    use super::{FunctionRegistry, HintErrorKind};
    use ttf_bytecode::parse;

    #[test]
    fn record_and_close() {
        let program = parse(&[0x20, 0x21, 0x60]).unwrap();
        let mut registry = FunctionRegistry::new(None);
        registry.insert(3).unwrap();
        registry.record(3, program[0]).unwrap();
        // open definitions are not callable
        assert_eq!(registry.get(3), Err(HintErrorKind::UndefinedFunction(3)));
        registry.record(3, program[1]).unwrap();
        registry.close(3).unwrap();
        let def = registry.get(3).unwrap();
        assert_eq!(def.instructions(), &program[..2]);
        // closed definitions are immutable
        assert_eq!(
            registry.record(3, program[2]),
            Err(HintErrorKind::UndefinedFunction(3))
        );
        assert_eq!(registry.get(3).unwrap().len(), 2);
    }

    #[test]
    fn redefine_replaces() {
        let program = parse(&[0x20]).unwrap();
        let mut registry = FunctionRegistry::new(None);
        registry.insert(1).unwrap();
        registry.record(1, program[0]).unwrap();
        registry.close(1).unwrap();
        registry.insert(1).unwrap();
        registry.close(1).unwrap();
        assert!(registry.get(1).unwrap().is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn missing() {
        let mut registry = FunctionRegistry::new(None);
        assert_eq!(registry.get(7), Err(HintErrorKind::UndefinedFunction(7)));
        assert_eq!(registry.close(7), Err(HintErrorKind::UndefinedFunction(7)));
    }

    #[test]
    fn limit() {
        let mut registry = FunctionRegistry::new(Some(2));
        registry.insert(5).unwrap();
        registry.insert(1).unwrap();
        // replacing an existing key is always allowed
        registry.insert(5).unwrap();
        assert_eq!(registry.insert(9), Err(HintErrorKind::TooManyDefinitions));
        assert_eq!(registry.keys(), vec![1, 5]);
        assert_eq!(
            registry.iter().map(|(key, _)| key).collect::<Vec<_>>(),
            vec![1, 5]
        );
    }
}
