//! Model builder methods for adding variables, constraints, and objectives.

use crate::types::{Bounds, Constraint, Objective, Sense, Variable};
use cropmix_expr::expr::{ComparisonSense, ConstraintExpr, Expr};
use cropmix_expr::ids::{ConstraintId, VariableId};

use crate::model::Model;
use crate::model::error::ModelError;

impl Model {
    /// Add a variable to the model.
    pub fn add_variable(&mut self, variable: Variable) -> Result<VariableId, ModelError> {
        if variable.bounds.lower.is_nan()
            || variable.bounds.upper.is_nan()
            || variable.bounds.lower > variable.bounds.upper
        {
            return Err(ModelError::InvalidVariableBounds {
                lower: variable.bounds.lower,
                upper: variable.bounds.upper,
            });
        }

        let id = VariableId::new(self.next_variable_id);
        self.next_variable_id += 1;
        self.variables.insert(id, variable);

        Ok(id)
    }

    /// Add a variable and register it in the name registry.
    pub fn named_variable(
        &mut self,
        name: &str,
        variable: Variable,
    ) -> Result<VariableId, ModelError> {
        if self.variables_by_name.contains_key(name) {
            return Err(ModelError::DuplicateName {
                name: name.to_string(),
            });
        }
        let id = self.add_variable(variable)?;
        self.register_variable_name(id, name);
        Ok(id)
    }

    /// Add a constraint to the model.
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<ConstraintId, ModelError> {
        if constraint.bounds.lower.is_nan()
            || constraint.bounds.upper.is_nan()
            || constraint.bounds.lower > constraint.bounds.upper
        {
            return Err(ModelError::InvalidConstraintBounds {
                lower: constraint.bounds.lower,
                upper: constraint.bounds.upper,
            });
        }

        let id = ConstraintId::new(self.next_constraint_id);
        self.next_constraint_id += 1;
        self.constraints.insert(id, constraint);

        Ok(id)
    }

    /// Set the objective function, replacing any previous one.
    pub fn set_objective(&mut self, objective: Objective) -> Result<(), ModelError> {
        let sense = objective.sense.ok_or(ModelError::NoObjective)?;
        for (var_id, coeff) in &objective.terms {
            self.ensure_variable_exists(*var_id)?;
            if !coeff.is_finite() {
                return Err(ModelError::InvalidCoefficient {
                    coefficient: *coeff,
                });
            }
        }

        let normalized = self.normalize_terms(objective.terms);
        self.objective = Objective {
            sense: Some(sense),
            terms: normalized,
        };
        self.objective_name = None;
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            sense = sense.as_str(),
            terms = self.objective.terms.len(),
            "Set objective function"
        );
        Ok(())
    }

    /// Minimize a linear expression.
    ///
    /// Returns an error if the model already has an objective.
    pub fn minimize(&mut self, expr: Expr) -> Result<(), ModelError> {
        if self.objective.sense.is_some() {
            return Err(ModelError::MultipleObjectives);
        }
        self.set_objective(Objective {
            sense: Some(Sense::Minimize),
            terms: expr.into_terms(),
        })
    }

    /// Maximize a linear expression.
    ///
    /// Returns an error if the model already has an objective.
    pub fn maximize(&mut self, expr: Expr) -> Result<(), ModelError> {
        if self.objective.sense.is_some() {
            return Err(ModelError::MultipleObjectives);
        }
        self.set_objective(Objective {
            sense: Some(Sense::Maximize),
            terms: expr.into_terms(),
        })
    }

    /// Add a constraint from an expression and explicit bounds.
    pub fn add_expr_constraint(
        &mut self,
        expr: Expr,
        bounds: Bounds,
    ) -> Result<ConstraintId, ModelError> {
        let constraint_id = self.add_constraint(Constraint::new(bounds))?;
        for (var_id, coeff) in self.normalize_terms(expr.into_terms()) {
            self.set_coefficient(var_id, constraint_id, coeff)?;
        }
        Ok(constraint_id)
    }

    /// Add a constraint from a comparison expression (e.g., `x + y <= 10`).
    pub fn add_constraint_expr(
        &mut self,
        constraint: ConstraintExpr,
    ) -> Result<ConstraintId, ModelError> {
        let (expr, sense, rhs) = constraint.into_parts();
        let bounds = match sense {
            ComparisonSense::LessEqual => Bounds::new(f64::NEG_INFINITY, rhs),
            ComparisonSense::GreaterEqual => Bounds::new(rhs, f64::INFINITY),
            ComparisonSense::Equal => Bounds::new(rhs, rhs),
        };
        self.add_expr_constraint(expr, bounds)
    }

    /// Add a coefficient at the intersection of a variable column and a
    /// constraint row. A second write to the same cell overwrites it.
    pub fn set_coefficient(
        &mut self,
        var_id: VariableId,
        constraint_id: ConstraintId,
        coefficient: f64,
    ) -> Result<(), ModelError> {
        if !coefficient.is_finite() {
            return Err(ModelError::InvalidCoefficient { coefficient });
        }
        self.ensure_variable_exists(var_id)?;
        self.ensure_constraint_exists(constraint_id)?;

        let column = self.columns.entry(var_id).or_default();
        match column.iter_mut().find(|(cid, _)| *cid == constraint_id) {
            Some((_, stored)) => *stored = coefficient,
            None => column.push((constraint_id, coefficient)),
        }

        Ok(())
    }

    /// Check if a variable is active.
    pub fn is_variable_active(&self, id: VariableId) -> Result<bool, ModelError> {
        self.get_variable(id).map(|var| var.is_active)
    }

    /// Deactivate a variable without removing its column.
    pub fn deactivate_variable(&mut self, id: VariableId) -> Result<(), ModelError> {
        self.set_variable_active(id, false)
    }

    /// Activate a previously deactivated variable.
    pub fn activate_variable(&mut self, id: VariableId) -> Result<(), ModelError> {
        self.set_variable_active(id, true)
    }

    /// Check if a constraint is active.
    pub fn is_constraint_active(&self, id: ConstraintId) -> Result<bool, ModelError> {
        self.get_constraint(id).map(|con| con.is_active)
    }

    /// Deactivate a constraint without removing its row.
    pub fn deactivate_constraint(&mut self, id: ConstraintId) -> Result<(), ModelError> {
        self.set_constraint_active(id, false)
    }

    /// Activate a previously deactivated constraint.
    pub fn activate_constraint(&mut self, id: ConstraintId) -> Result<(), ModelError> {
        self.set_constraint_active(id, true)
    }

    fn set_variable_active(&mut self, id: VariableId, active: bool) -> Result<(), ModelError> {
        match self.variables.get_mut(&id) {
            Some(var) => {
                var.is_active = active;
                Ok(())
            }
            None => Err(ModelError::InvalidVariableId(id)),
        }
    }

    fn set_constraint_active(&mut self, id: ConstraintId, active: bool) -> Result<(), ModelError> {
        match self.constraints.get_mut(&id) {
            Some(con) => {
                con.is_active = active;
                Ok(())
            }
            None => Err(ModelError::InvalidConstraintId(id)),
        }
    }
}
