//! Typed name registry.
//!
//! Declared names map to typed handles, populated when the model is built.
//! Lookups hand back a [`VariableId`]/[`ConstraintId`] to use with the
//! storage API; there is no by-name attribute access anywhere else.

use cropmix_expr::ids::{ConstraintId, VariableId};

use crate::model::Model;
use crate::model::error::ModelError;

impl Model {
    pub(crate) fn register_variable_name(&mut self, id: VariableId, name: &str) {
        self.variable_names.insert(id, name.to_string());
        self.variables_by_name.insert(name.to_string(), id);
    }

    pub(crate) fn register_constraint_name(&mut self, id: ConstraintId, name: &str) {
        self.constraint_names.insert(id, name.to_string());
        self.constraints_by_name.insert(name.to_string(), id);
    }

    /// Name a constraint after the fact.
    pub fn set_constraint_name(&mut self, id: ConstraintId, name: &str) -> Result<(), ModelError> {
        self.ensure_constraint_exists(id)?;
        if self.constraints_by_name.contains_key(name) {
            return Err(ModelError::DuplicateName {
                name: name.to_string(),
            });
        }
        self.register_constraint_name(id, name);
        Ok(())
    }

    /// Look up a variable handle by declared name.
    pub fn variable_named(&self, name: &str) -> Option<VariableId> {
        self.variables_by_name.get(name).copied()
    }

    /// Look up a constraint handle by declared name.
    pub fn constraint_named(&self, name: &str) -> Option<ConstraintId> {
        self.constraints_by_name.get(name).copied()
    }

    /// Get the declared name of a variable.
    pub fn variable_name(&self, id: VariableId) -> Option<&str> {
        self.variable_names.get(&id).map(String::as_str)
    }

    /// Get the declared name of a constraint.
    pub fn constraint_name(&self, id: ConstraintId) -> Option<&str> {
        self.constraint_names.get(&id).map(String::as_str)
    }

    /// Set the objective name.
    pub fn set_objective_name(&mut self, name: Option<String>) {
        self.objective_name = name;
    }

    /// Get the objective name.
    pub fn objective_name(&self) -> Option<&str> {
        self.objective_name.as_deref()
    }

    /// Display label for a variable: its declared name, or a positional
    /// `x[i]` fallback.
    pub fn variable_label(&self, id: VariableId) -> String {
        self.variable_name(id)
            .map_or_else(|| format!("x[{}]", id.inner() + 1), ToString::to_string)
    }

    /// Display label for a constraint: its declared name, or a positional
    /// `c[i]` fallback.
    pub fn constraint_label(&self, id: ConstraintId) -> String {
        self.constraint_name(id)
            .map_or_else(|| format!("c[{}]", id.inner() + 1), ToString::to_string)
    }
}
