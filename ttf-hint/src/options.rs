//! Configuration for the virtual machine.

/// Default number of storage area slots when no `maxp` profile is given.
pub const DEFAULT_MAX_STORAGE: usize = 64;

/// Maximum nesting depth of function calls.
///
/// Matches the call stack size used by FreeType.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 32;

/// Maximum number of instructions dispatched by a single run.
///
/// This bounds runaway `LOOPCALL[]` chains in adversarial fonts.
pub const DEFAULT_MAX_INSTRUCTIONS: usize = 1_000_000;

/// Resource limits taken from a version 1.0 `maxp` table.
///
/// See <https://learn.microsoft.com/en-us/typography/opentype/spec/maxp>
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct MaxProfile {
    pub max_storage: u16,
    pub max_function_defs: u16,
    pub max_instruction_defs: u16,
    pub max_stack_elements: u16,
}

/// Options that control a [`Vm`](crate::Vm).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VmOptions {
    /// Maximum operand stack depth. Unbounded if `None`.
    pub max_stack_depth: Option<usize>,
    /// Number of slots in the storage area.
    pub max_storage: usize,
    /// Maximum number of distinct function numbers. Unbounded if `None`.
    pub max_function_defs: Option<usize>,
    /// Maximum number of distinct instruction definitions. Unbounded if
    /// `None`.
    pub max_instruction_defs: Option<usize>,
    pub max_call_depth: usize,
    pub max_instructions: usize,
    /// Pixels per em reported by `MPPEM[]`.
    pub ppem: u16,
    /// Point size in 26.6 reported by `MPS[]`.
    pub point_size: i32,
    /// 16.16 factor converting font units to 26.6 pixels, used by
    /// `WCVTF[]`.
    pub scale: i32,
    /// Number of variation axes. Zero for non-variable fonts.
    pub axis_count: u16,
    /// Initial control value table in 26.6 pixels.
    pub cvt: Vec<i32>,
}

impl Default for VmOptions {
    fn default() -> Self {
        Self {
            max_stack_depth: None,
            max_storage: DEFAULT_MAX_STORAGE,
            max_function_defs: None,
            max_instruction_defs: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            max_instructions: DEFAULT_MAX_INSTRUCTIONS,
            ppem: 0,
            point_size: 0,
            scale: 1 << 16,
            axis_count: 0,
            cvt: Vec::new(),
        }
    }
}

impl VmOptions {
    /// Applies the limits declared by a `maxp` table.
    pub fn with_max_profile(mut self, profile: &MaxProfile) -> Self {
        self.max_storage = profile.max_storage as usize;
        self.max_function_defs = Some(profile.max_function_defs as usize);
        self.max_instruction_defs = Some(profile.max_instruction_defs as usize);
        // Some fonts underestimate their stack usage so, as in FreeType,
        // leave some headroom.
        self.max_stack_depth = Some(profile.max_stack_elements as usize + 32);
        self
    }

    pub fn with_ppem(mut self, ppem: u16) -> Self {
        self.ppem = ppem;
        self
    }

    pub fn with_cvt(mut self, cvt: Vec<i32>) -> Self {
        self.cvt = cvt;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{MaxProfile, VmOptions};

    #[test]
    fn apply_max_profile() {
        let profile = MaxProfile {
            max_storage: 10,
            max_function_defs: 4,
            max_instruction_defs: 0,
            max_stack_elements: 100,
        };
        let options = VmOptions::default().with_max_profile(&profile).with_ppem(16);
        assert_eq!(options.max_storage, 10);
        assert_eq!(options.max_function_defs, Some(4));
        assert_eq!(options.max_instruction_defs, Some(0));
        assert_eq!(options.max_stack_depth, Some(132));
        assert_eq!(options.ppem, 16);
        assert_eq!(options.max_call_depth, 32);
    }
}
