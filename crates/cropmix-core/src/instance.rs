//! A model instance: current variable values plus attached solve results.
//!
//! The instance is what the reporting utilities read and what the two
//! mutating passes (zero-initialization, discrete fixing) write. Values
//! live in dense vectors indexed by ID position; constraint duals live in a
//! map so that "no dual recorded" stays distinct from a dual of zero.

use std::collections::BTreeMap;

use cropmix_expr::ids::{ConstraintId, VariableId};
use cropmix_solver::{LoweredProblem, Solution, SolverStatus};

use crate::model::{Model, ModelError};
use crate::types::Bounds;

/// Result of checking one variable against its declared bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsStatus {
    Within,
    OutOfBounds,
}

/// A model plus per-variable state.
///
/// Values start at `0.0` for every variable. Attaching a [`Solution`]
/// overwrites them with the solver's point and records whatever duals the
/// backend produced.
#[derive(Debug, Clone)]
pub struct Instance {
    model: Model,
    values: Vec<f64>,
    fixed: Vec<bool>,
    duals: BTreeMap<ConstraintId, f64>,
    status: Option<SolverStatus>,
}

impl Instance {
    /// Wrap a built model into an instance with zeroed values.
    pub fn new(model: Model) -> Self {
        let n = model.num_variables();
        Self {
            model,
            values: vec![0.0; n],
            fixed: vec![false; n],
            duals: BTreeMap::new(),
            status: None,
        }
    }

    /// The underlying model.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Status of the last attached solve, if any.
    pub fn solver_status(&self) -> Option<SolverStatus> {
        self.status
    }

    /// Deactivate a variable; reports skip it.
    pub fn deactivate_variable(&mut self, id: VariableId) -> Result<(), ModelError> {
        self.model.deactivate_variable(id)
    }

    /// Reactivate a variable.
    pub fn activate_variable(&mut self, id: VariableId) -> Result<(), ModelError> {
        self.model.activate_variable(id)
    }

    /// Deactivate a constraint; reports skip it.
    pub fn deactivate_constraint(&mut self, id: ConstraintId) -> Result<(), ModelError> {
        self.model.deactivate_constraint(id)
    }

    /// Reactivate a constraint.
    pub fn activate_constraint(&mut self, id: ConstraintId) -> Result<(), ModelError> {
        self.model.activate_constraint(id)
    }

    // ── Values ──────────────────────────────────────────────

    /// Current value of a variable.
    pub fn value(&self, id: VariableId) -> Result<f64, ModelError> {
        self.model.ensure_variable_exists(id)?;
        Ok(self.values[id.index()])
    }

    /// Set the current value of a variable.
    pub fn set_value(&mut self, id: VariableId, value: f64) -> Result<(), ModelError> {
        self.model.ensure_variable_exists(id)?;
        self.values[id.index()] = value;
        Ok(())
    }

    /// Iterate (id, value) pairs in ID order.
    pub fn values(&self) -> impl Iterator<Item = (VariableId, f64)> + '_ {
        self.model
            .variables()
            .map(move |(id, _)| (id, self.values[id.index()]))
    }

    /// Set every active variable's value to `0.0`.
    pub fn zero_all(&mut self) {
        let mut reset = 0usize;
        for (id, var) in self.model.variables() {
            if var.is_active {
                self.values[id.index()] = 0.0;
                reset += 1;
            }
        }
        tracing::debug!(
            component = "instance",
            operation = "zero_all",
            status = "success",
            variables = reset,
            "Zero-initialized variable values"
        );
    }

    // ── Fixing ──────────────────────────────────────────────

    /// Fix every active integer- or binary-domain variable at its current
    /// value, so a subsequent solve cannot move it. Continuous variables
    /// are left untouched.
    ///
    /// Returns the number of variables fixed by this pass.
    pub fn fix_discrete(&mut self) -> usize {
        let mut count = 0usize;
        for (id, var) in self.model.variables() {
            if var.is_active && var.domain.is_discrete() {
                self.fixed[id.index()] = true;
                count += 1;
            }
        }
        tracing::debug!(
            component = "instance",
            operation = "fix_discrete",
            status = "success",
            variables = count,
            "Fixed discrete variables at current values"
        );
        count
    }

    /// Whether a variable has been fixed.
    pub fn is_fixed(&self, id: VariableId) -> Result<bool, ModelError> {
        self.model.ensure_variable_exists(id)?;
        Ok(self.fixed[id.index()])
    }

    /// Bounds a subsequent solve would see: the declared box, collapsed to
    /// the current value for fixed variables.
    pub fn effective_bounds(&self, id: VariableId) -> Result<Bounds, ModelError> {
        let var = self.model.get_variable(id)?;
        if self.fixed[id.index()] {
            let value = self.values[id.index()];
            Ok(Bounds::new(value, value))
        } else {
            Ok(var.bounds)
        }
    }

    // ── Bounds checking ─────────────────────────────────────

    /// Check the current value against the declared bounds.
    ///
    /// An infinite bound is treated as unset and never flags; a value equal
    /// to a bound is within bounds.
    pub fn bounds_status(&self, id: VariableId) -> Result<BoundsStatus, ModelError> {
        let var = self.model.get_variable(id)?;
        let value = self.values[id.index()];
        let below = var.bounds.lower.is_finite() && value < var.bounds.lower;
        let above = var.bounds.upper.is_finite() && value > var.bounds.upper;
        if below || above {
            Ok(BoundsStatus::OutOfBounds)
        } else {
            Ok(BoundsStatus::Within)
        }
    }

    // ── Constraint-side views ───────────────────────────────

    /// Row activity: the constraint LHS evaluated at the current values.
    pub fn activity(&self, id: ConstraintId) -> Result<f64, ModelError> {
        let row = self.model.row(id)?;
        Ok(row
            .iter()
            .map(|(var_id, coeff)| coeff * self.values[var_id.index()])
            .sum())
    }

    /// Lower and upper slack of a constraint at the current values:
    /// `(activity - lower, upper - activity)`. A missing bound yields an
    /// infinite slack on that side.
    pub fn slack(&self, id: ConstraintId) -> Result<(f64, f64), ModelError> {
        let bounds = self.model.get_constraint(id)?.bounds;
        let activity = self.activity(id)?;
        Ok((activity - bounds.lower, bounds.upper - activity))
    }

    /// Dual (shadow price) recorded for a constraint, if the attached solve
    /// produced one. `None` means no dual available, which is not the same
    /// as a zero dual.
    pub fn dual(&self, id: ConstraintId) -> Option<f64> {
        self.duals.get(&id).copied()
    }

    // ── Objective ───────────────────────────────────────────

    /// Objective value at the current variable values.
    ///
    /// Returns `None` when the model has no active objective; callers that
    /// consider that a hard error can turn the absence into one.
    pub fn objective_value(&self) -> Option<f64> {
        let objective = self.model.objective();
        objective.sense?;
        Some(
            objective
                .terms
                .iter()
                .map(|(var_id, coeff)| coeff * self.values[var_id.index()])
                .sum(),
        )
    }

    // ── Solver boundary ─────────────────────────────────────

    /// Copy a solver's point into the instance.
    ///
    /// Primal values overwrite the current values; constraint duals are
    /// recorded per row when the backend produced any. A solution whose
    /// primal vector does not match the variable count is rejected.
    pub fn attach_solution(&mut self, solution: &Solution) -> Result<(), ModelError> {
        if solution.primal_values.len() != self.model.num_variables() {
            return Err(ModelError::MismatchedSolution {
                expected: self.model.num_variables(),
                actual: solution.primal_values.len(),
            });
        }

        self.values.copy_from_slice(&solution.primal_values);
        self.duals.clear();
        if solution.has_duals() {
            for (id, _) in self.model.constraints() {
                if let Some(dual) = solution.get_constraint_dual(id.index()) {
                    self.duals.insert(id, dual);
                }
            }
        }
        self.status = Some(solution.status);
        tracing::debug!(
            component = "instance",
            operation = "attach_solution",
            status = "success",
            solver_status = solution.status.as_str(),
            duals = self.duals.len(),
            "Attached solver solution"
        );
        Ok(())
    }

    /// Lower the instance into the flat shape a solver backend consumes.
    ///
    /// Fixed variables are shipped with their box collapsed to the current
    /// value, which is how fixing survives a subsequent solve.
    pub fn lower(&self) -> LoweredProblem {
        let mut column_bounds = Vec::with_capacity(self.model.num_variables());
        for (id, _) in self.model.variables() {
            // effective_bounds cannot fail for an id the model just yielded
            let bounds = self
                .effective_bounds(id)
                .unwrap_or_else(|_| Bounds::free());
            column_bounds.push((bounds.lower, bounds.upper));
        }

        let mut objective = vec![0.0; self.model.num_variables()];
        for (var_id, coeff) in &self.model.objective().terms {
            objective[var_id.index()] = *coeff;
        }

        let rows = self
            .model
            .rows()
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|(var_id, coeff)| (var_id.index(), coeff))
                    .collect()
            })
            .collect();

        let row_bounds = self
            .model
            .constraints()
            .map(|(_, con)| (con.bounds.lower, con.bounds.upper))
            .collect();

        LoweredProblem {
            column_bounds,
            objective,
            maximize: matches!(
                self.model.objective().sense,
                Some(crate::types::Sense::Maximize)
            ),
            rows,
            row_bounds,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::{Bounds, Constraint, Objective, Sense, Variable};
    use cropmix_solver::SolverStatus;

    fn crop_instance() -> Instance {
        let mut model = Model::new();
        let tomato = model
            .named_variable("tomato", Variable::continuous(Bounds::from_zero_to(10.0)))
            .unwrap();
        let lettuce = model
            .named_variable("lettuce", Variable::continuous(Bounds::from_zero_to(10.0)))
            .unwrap();
        let land = model.add_constraint(Constraint::at_most(15.0)).unwrap();
        model.set_constraint_name(land, "land").unwrap();
        model.set_coefficient(tomato, land, 1.0).unwrap();
        model.set_coefficient(lettuce, land, 1.0).unwrap();
        model
            .set_objective(Objective {
                sense: Some(Sense::Maximize),
                terms: vec![(tomato, 3.0), (lettuce, 2.0)],
            })
            .unwrap();
        model.set_objective_name(Some("revenue".to_string()));
        Instance::new(model)
    }

    fn optimal_solution() -> Solution {
        Solution {
            primal_values: vec![10.0, 5.0],
            variable_duals: vec![1.0, 0.0],
            constraint_duals: vec![2.0],
            row_values: vec![15.0],
            objective_value: 40.0,
            status: SolverStatus::Optimal,
            solve_time_seconds: 0.0,
        }
    }

    #[test]
    fn fresh_instance_is_zeroed() {
        let instance = crop_instance();
        for (_, value) in instance.values() {
            assert_eq!(value, 0.0);
        }
        assert_eq!(instance.objective_value(), Some(0.0));
        assert!(instance.solver_status().is_none());
    }

    #[test]
    fn zero_all_resets_after_attach() {
        let mut instance = crop_instance();
        instance.attach_solution(&optimal_solution()).unwrap();
        assert_eq!(instance.objective_value(), Some(40.0));

        instance.zero_all();
        for (_, value) in instance.values() {
            assert_eq!(value, 0.0);
        }
        assert_eq!(instance.objective_value(), Some(0.0));
    }

    #[test]
    fn zero_all_skips_inactive_variables() {
        let mut model = Model::new();
        let a = model
            .add_variable(Variable::continuous(Bounds::from_zero_to(10.0)))
            .unwrap();
        let b = model
            .add_variable(Variable::continuous(Bounds::from_zero_to(10.0)))
            .unwrap();
        model.deactivate_variable(b).unwrap();
        let mut instance = Instance::new(model);
        instance.set_value(a, 4.0).unwrap();
        instance.set_value(b, 7.0).unwrap();

        instance.zero_all();
        assert_eq!(instance.value(a).unwrap(), 0.0);
        assert_eq!(instance.value(b).unwrap(), 7.0);
    }

    #[test]
    fn fix_discrete_only_touches_discrete_domains() {
        let mut model = Model::new();
        let cont = model
            .add_variable(Variable::continuous(Bounds::from_zero_to(10.0)))
            .unwrap();
        let int = model
            .add_variable(Variable::integer(Bounds::from_zero_to(10.0)))
            .unwrap();
        let bin = model.add_variable(Variable::binary()).unwrap();
        let mut instance = Instance::new(model);
        instance.set_value(int, 3.0).unwrap();

        assert_eq!(instance.fix_discrete(), 2);
        assert!(!instance.is_fixed(cont).unwrap());
        assert!(instance.is_fixed(int).unwrap());
        assert!(instance.is_fixed(bin).unwrap());

        // Fixed variables collapse to their current value for the next solve.
        let bounds = instance.effective_bounds(int).unwrap();
        assert_eq!(bounds.lower, 3.0);
        assert_eq!(bounds.upper, 3.0);
        let free = instance.effective_bounds(cont).unwrap();
        assert_eq!(free.upper, 10.0);
    }

    #[test]
    fn bounds_status_flags_only_set_bounds() {
        let mut model = Model::new();
        let boxed = model
            .add_variable(Variable::continuous(Bounds::from_zero_to(10.0)))
            .unwrap();
        let free = model
            .add_variable(Variable::continuous(Bounds::free()))
            .unwrap();
        let mut instance = Instance::new(model);

        instance.set_value(boxed, 5.0).unwrap();
        assert_eq!(instance.bounds_status(boxed).unwrap(), BoundsStatus::Within);

        // Values on a bound are still in bounds.
        instance.set_value(boxed, 10.0).unwrap();
        assert_eq!(instance.bounds_status(boxed).unwrap(), BoundsStatus::Within);

        instance.set_value(boxed, 10.5).unwrap();
        assert_eq!(
            instance.bounds_status(boxed).unwrap(),
            BoundsStatus::OutOfBounds
        );
        instance.set_value(boxed, -0.5).unwrap();
        assert_eq!(
            instance.bounds_status(boxed).unwrap(),
            BoundsStatus::OutOfBounds
        );

        instance.set_value(free, 1e12).unwrap();
        assert_eq!(instance.bounds_status(free).unwrap(), BoundsStatus::Within);
        instance.set_value(free, -1e12).unwrap();
        assert_eq!(instance.bounds_status(free).unwrap(), BoundsStatus::Within);
    }

    #[test]
    fn activity_and_slack_track_values() {
        let mut instance = crop_instance();
        let land = instance.model().constraint_named("land").unwrap();

        assert_eq!(instance.activity(land).unwrap(), 0.0);
        let (lslack, uslack) = instance.slack(land).unwrap();
        assert!(lslack.is_infinite()); // no lower bound
        assert_eq!(uslack, 15.0);

        instance.attach_solution(&optimal_solution()).unwrap();
        assert_eq!(instance.activity(land).unwrap(), 15.0);
        let (_, uslack) = instance.slack(land).unwrap();
        assert_eq!(uslack, 0.0);
    }

    #[test]
    fn duals_distinguish_absent_from_zero() {
        let mut instance = crop_instance();
        let land = instance.model().constraint_named("land").unwrap();
        assert_eq!(instance.dual(land), None);

        let mut solution = optimal_solution();
        solution.constraint_duals = vec![0.0];
        instance.attach_solution(&solution).unwrap();
        assert_eq!(instance.dual(land), Some(0.0));

        // A MIP-style solution without duals clears them again.
        let mut no_duals = optimal_solution();
        no_duals.constraint_duals = Vec::new();
        instance.attach_solution(&no_duals).unwrap();
        assert_eq!(instance.dual(land), None);
    }

    #[test]
    fn attach_rejects_wrong_shape() {
        let mut instance = crop_instance();
        let mut solution = optimal_solution();
        solution.primal_values = vec![1.0];
        let result = instance.attach_solution(&solution);
        assert!(matches!(
            result,
            Err(ModelError::MismatchedSolution {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn objective_value_is_none_without_objective() {
        let mut model = Model::new();
        model
            .add_variable(Variable::continuous(Bounds::from_zero_to(1.0)))
            .unwrap();
        let instance = Instance::new(model);
        assert_eq!(instance.objective_value(), None);
    }

    #[test]
    fn lower_ships_effective_bounds_and_sense() {
        let mut model = Model::new();
        let x = model
            .named_variable("x", Variable::integer(Bounds::from_zero_to(10.0)))
            .unwrap();
        let c = model.add_constraint(Constraint::at_most(4.0)).unwrap();
        model.set_coefficient(x, c, 2.0).unwrap();
        model.maximize(cropmix_expr::Expr::term(x, 1.0)).unwrap();

        let mut instance = Instance::new(model);
        instance.set_value(x, 2.0).unwrap();
        instance.fix_discrete();

        let lowered = instance.lower();
        assert!(lowered.maximize);
        assert_eq!(lowered.column_bounds, vec![(2.0, 2.0)]);
        assert_eq!(lowered.objective, vec![1.0]);
        assert_eq!(lowered.rows, vec![vec![(0usize, 2.0)]]);
        assert_eq!(lowered.row_bounds, vec![(f64::NEG_INFINITY, 4.0)]);
    }
}
