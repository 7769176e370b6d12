//! Storage access methods for the model.

use crate::types::{Constraint, Variable};
use cropmix_expr::ids::{ConstraintId, VariableId};

use super::Model;
use super::error::ModelError;

impl Model {
    /// Get the number of variables.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Get the number of constraints.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Get the number of stored coefficients.
    pub fn num_coefficients(&self) -> usize {
        self.columns.values().map(|coeffs| coeffs.len()).sum()
    }

    /// Get a variable by ID.
    pub fn get_variable(&self, id: VariableId) -> Result<&Variable, ModelError> {
        self.variables
            .get(&id)
            .ok_or(ModelError::InvalidVariableId(id))
    }

    /// Get a constraint by ID.
    pub fn get_constraint(&self, id: ConstraintId) -> Result<&Constraint, ModelError> {
        self.constraints
            .get(&id)
            .ok_or(ModelError::InvalidConstraintId(id))
    }

    /// Iterate variables in ID order.
    pub fn variables(&self) -> impl Iterator<Item = (VariableId, &Variable)> {
        self.variables.iter().map(|(&id, var)| (id, var))
    }

    /// Iterate constraints in ID order.
    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> {
        self.constraints.iter().map(|(&id, con)| (id, con))
    }

    /// Iterate the coefficient matrix column by column.
    pub fn columns(&self) -> impl Iterator<Item = (VariableId, &Vec<(ConstraintId, f64)>)> {
        self.columns.iter().map(|(&vid, coeffs)| (vid, coeffs))
    }

    /// Get the coefficient matrix in row-major form.
    ///
    /// Returns a vector indexed by constraint position, each row containing
    /// (variable_id, coefficient) pairs.
    pub fn rows(&self) -> Vec<Vec<(VariableId, f64)>> {
        let mut rows = vec![Vec::new(); self.num_constraints()];
        for (var_id, coeffs) in &self.columns {
            for (constraint_id, coeff) in coeffs {
                if let Some(row) = rows.get_mut(constraint_id.index()) {
                    row.push((*var_id, *coeff));
                }
            }
        }
        rows
    }

    /// Get the coefficients for a specific variable (column).
    pub fn get_column(&self, var_id: VariableId) -> Option<&Vec<(ConstraintId, f64)>> {
        self.columns.get(&var_id)
    }

    /// Get the coefficients of one constraint row.
    pub fn row(&self, constraint_id: ConstraintId) -> Result<Vec<(VariableId, f64)>, ModelError> {
        self.ensure_constraint_exists(constraint_id)?;
        let mut row = Vec::new();
        for (var_id, coeffs) in &self.columns {
            for (cid, coeff) in coeffs {
                if *cid == constraint_id {
                    row.push((*var_id, *coeff));
                }
            }
        }
        Ok(row)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::Bounds;

    #[test]
    fn rows_transpose_columns() {
        let mut model = Model::new();
        let x = model
            .add_variable(Variable::continuous(Bounds::from_zero_to(10.0)))
            .unwrap();
        let y = model
            .add_variable(Variable::continuous(Bounds::from_zero_to(10.0)))
            .unwrap();
        let c0 = model.add_constraint(Constraint::at_most(15.0)).unwrap();
        let c1 = model.add_constraint(Constraint::at_most(8.0)).unwrap();
        model.set_coefficient(x, c0, 1.0).unwrap();
        model.set_coefficient(y, c0, 1.0).unwrap();
        model.set_coefficient(y, c1, 2.0).unwrap();

        let rows = model.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![(x, 1.0), (y, 1.0)]);
        assert_eq!(rows[1], vec![(y, 2.0)]);

        assert_eq!(model.row(c1).unwrap(), vec![(y, 2.0)]);
    }

    #[test]
    fn row_of_unknown_constraint_fails() {
        let model = Model::new();
        let result = model.row(ConstraintId::new(0));
        assert!(matches!(result, Err(ModelError::InvalidConstraintId(_))));
    }
}
