//! Typed handles for model entities.
//!
//! IDs are allocated densely by the model builder, so `inner()` doubles as a
//! position index into value and dual storage.

/// Handle to a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct VariableId(u32);

impl VariableId {
    /// Create an ID from a u32 value.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the inner u32 value.
    pub fn inner(self) -> u32 {
        self.0
    }

    /// Position index into dense per-variable storage.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ConstraintId(u32);

impl ConstraintId {
    /// Create an ID from a u32 value.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the inner u32 value.
    pub fn inner(self) -> u32 {
        self.0
    }

    /// Position index into dense per-constraint storage.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
