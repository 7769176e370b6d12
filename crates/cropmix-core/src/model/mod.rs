//! Model module for building linear programming models.
//!
//! # Module Organization
//!
//! - [`error`]: Model error types
//! - [`builder`]: Methods for adding variables, constraints, and objectives
//! - [`storage`]: Column-first sparse storage access
//! - [`registry`]: Typed name registry (name -> handle)
//! - [`pretty`]: Human-readable ASCII rendering

mod builder;
mod error;
mod pretty;
mod registry;
mod storage;

use crate::types::{Constraint, Objective, Variable};
use cropmix_expr::ids::{ConstraintId, VariableId};
use std::collections::BTreeMap;

pub use error::ModelError;
pub use pretty::{PrettyOptions, format_number};

/// A builder for linear programs.
///
/// Variables, constraints, and objective can be added at any time. The
/// coefficient matrix uses column-first sparse storage; IDs are allocated
/// densely so they double as positions in value vectors.
///
/// Names are registered at construction time into a typed registry, so a
/// lookup returns a [`VariableId`]/[`ConstraintId`] handle rather than a
/// stringly-typed component.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub(crate) variables: BTreeMap<VariableId, Variable>,
    pub(crate) constraints: BTreeMap<ConstraintId, Constraint>,
    pub(crate) objective: Objective,
    pub(crate) objective_name: Option<String>,
    // Column-first sparse storage: variable_id -> vec of (constraint_id, coefficient)
    pub(crate) columns: BTreeMap<VariableId, Vec<(ConstraintId, f64)>>,
    pub(crate) next_variable_id: u32,
    pub(crate) next_constraint_id: u32,
    pub(crate) variable_names: BTreeMap<VariableId, String>,
    pub(crate) variables_by_name: BTreeMap<String, VariableId>,
    pub(crate) constraint_names: BTreeMap<ConstraintId, String>,
    pub(crate) constraints_by_name: BTreeMap<String, ConstraintId>,
}

impl Model {
    /// Create a new empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the objective.
    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub(crate) fn ensure_variable_exists(&self, id: VariableId) -> Result<(), ModelError> {
        if self.variables.contains_key(&id) {
            Ok(())
        } else {
            Err(ModelError::InvalidVariableId(id))
        }
    }

    pub(crate) fn ensure_constraint_exists(&self, id: ConstraintId) -> Result<(), ModelError> {
        if self.constraints.contains_key(&id) {
            Ok(())
        } else {
            Err(ModelError::InvalidConstraintId(id))
        }
    }

    /// Merge duplicate terms and drop exact zeros.
    pub(crate) fn normalize_terms(&self, terms: Vec<(VariableId, f64)>) -> Vec<(VariableId, f64)> {
        let mut merged: BTreeMap<VariableId, f64> = BTreeMap::new();
        for (var_id, coeff) in terms {
            if coeff == 0.0 {
                continue;
            }
            *merged.entry(var_id).or_insert(0.0) += coeff;
        }
        merged
            .into_iter()
            .filter(|(_, coeff)| *coeff != 0.0)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::{Bounds, Sense};
    use cropmix_expr::expr::{ComparisonSense, ConstraintExpr, Expr};

    #[test]
    fn new_model_is_empty() {
        let model = Model::new();
        assert_eq!(model.num_variables(), 0);
        assert_eq!(model.num_constraints(), 0);
        assert!(!model.objective().is_active());
    }

    #[test]
    fn add_variable_allocates_dense_ids() {
        let mut model = Model::new();
        let a = model
            .add_variable(Variable::continuous(Bounds::from_zero_to(10.0)))
            .unwrap();
        let b = model
            .add_variable(Variable::continuous(Bounds::from_zero_to(5.0)))
            .unwrap();
        assert_eq!(a.inner(), 0);
        assert_eq!(b.inner(), 1);
        assert_eq!(model.num_variables(), 2);
        assert_eq!(model.get_variable(b).unwrap().bounds.upper, 5.0);
    }

    #[test]
    fn variable_bounds_are_validated() {
        let mut model = Model::new();
        let result = model.add_variable(Variable::continuous(Bounds::new(5.0, 1.0)));
        assert!(matches!(
            result,
            Err(ModelError::InvalidVariableBounds { .. })
        ));

        let nan = model.add_variable(Variable::continuous(Bounds::new(f64::NAN, 1.0)));
        assert!(matches!(nan, Err(ModelError::InvalidVariableBounds { .. })));
    }

    #[test]
    fn constraint_bounds_are_validated() {
        let mut model = Model::new();
        let result = model.add_constraint(Constraint::new(Bounds::new(10.0, 0.0)));
        assert!(matches!(
            result,
            Err(ModelError::InvalidConstraintBounds { .. })
        ));
    }

    #[test]
    fn set_objective_requires_a_sense() {
        let mut model = Model::new();
        let result = model.set_objective(Objective::new());
        assert_eq!(result, Err(ModelError::NoObjective));
    }

    #[test]
    fn second_objective_is_rejected() {
        let mut model = Model::new();
        let x = model
            .add_variable(Variable::continuous(Bounds::from_zero_to(1.0)))
            .unwrap();
        model.maximize(Expr::term(x, 1.0)).unwrap();
        let result = model.minimize(Expr::term(x, 1.0));
        assert_eq!(result, Err(ModelError::MultipleObjectives));
    }

    #[test]
    fn objective_terms_are_normalized() {
        let mut model = Model::new();
        let x = model
            .add_variable(Variable::continuous(Bounds::from_zero_to(1.0)))
            .unwrap();
        let y = model
            .add_variable(Variable::continuous(Bounds::from_zero_to(1.0)))
            .unwrap();
        model
            .set_objective(Objective {
                sense: Some(Sense::Maximize),
                terms: vec![(x, 1.0), (x, 2.0), (y, 0.0)],
            })
            .unwrap();
        assert_eq!(model.objective().terms, vec![(x, 3.0)]);
    }

    #[test]
    fn coefficients_persist_in_columns() {
        let mut model = Model::new();
        let v1 = model
            .add_variable(Variable::continuous(Bounds::from_zero_to(10.0)))
            .unwrap();
        let v2 = model
            .add_variable(Variable::integer(Bounds::new(-5.0, 5.0)))
            .unwrap();
        let c1 = model.add_constraint(Constraint::at_most(15.0)).unwrap();
        let c2 = model
            .add_constraint(Constraint::new(Bounds::new(-10.0, 10.0)))
            .unwrap();

        model.set_coefficient(v1, c1, 1.5).unwrap();
        model.set_coefficient(v1, c2, -2.0).unwrap();
        model.set_coefficient(v2, c2, 3.5).unwrap();

        assert_eq!(model.get_column(v1).unwrap(), &vec![(c1, 1.5), (c2, -2.0)]);
        assert_eq!(model.get_column(v2).unwrap(), &vec![(c2, 3.5)]);
        assert_eq!(model.num_coefficients(), 3);
    }

    #[test]
    fn set_coefficient_rejects_unknown_ids() {
        let mut model = Model::new();
        let c = model.add_constraint(Constraint::at_most(1.0)).unwrap();
        let ghost = VariableId::new(999);
        assert_eq!(
            model.set_coefficient(ghost, c, 2.5),
            Err(ModelError::InvalidVariableId(ghost))
        );

        let x = model
            .add_variable(Variable::continuous(Bounds::from_zero_to(1.0)))
            .unwrap();
        let ghost_con = ConstraintId::new(999);
        assert_eq!(
            model.set_coefficient(x, ghost_con, 2.5),
            Err(ModelError::InvalidConstraintId(ghost_con))
        );
    }

    #[test]
    fn add_constraint_expr_maps_senses_to_bounds() {
        let mut model = Model::new();
        let x = model
            .add_variable(Variable::continuous(Bounds::from_zero_to(1.0)))
            .unwrap();

        let ge = ConstraintExpr::new(Expr::term(x, 1.0), ComparisonSense::GreaterEqual, 2.0);
        let con = model.add_constraint_expr(ge).unwrap();
        let stored = model.get_constraint(con).unwrap();
        assert_eq!(stored.bounds.lower, 2.0);
        assert!(stored.bounds.upper.is_infinite());

        let eq = ConstraintExpr::new(Expr::term(x, 1.0), ComparisonSense::Equal, 4.0);
        let con = model.add_constraint_expr(eq).unwrap();
        let stored = model.get_constraint(con).unwrap();
        assert_eq!(stored.bounds.lower, 4.0);
        assert_eq!(stored.bounds.upper, 4.0);
    }

    #[test]
    fn activation_toggles() {
        let mut model = Model::new();
        let x = model
            .add_variable(Variable::continuous(Bounds::from_zero_to(1.0)))
            .unwrap();
        let c = model.add_constraint(Constraint::at_most(1.0)).unwrap();

        assert!(model.is_variable_active(x).unwrap());
        model.deactivate_variable(x).unwrap();
        assert!(!model.is_variable_active(x).unwrap());
        model.activate_variable(x).unwrap();
        assert!(model.is_variable_active(x).unwrap());

        assert!(model.is_constraint_active(c).unwrap());
        model.deactivate_constraint(c).unwrap();
        assert!(!model.is_constraint_active(c).unwrap());
    }
}
