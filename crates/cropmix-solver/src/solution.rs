//! Solver-agnostic solution data.

use crate::SolverStatus;

/// Results of one solve, in the order the model's dense IDs were declared.
///
/// `constraint_duals` may be empty when the backend provides no duals (for
/// example after an integer solve); an empty vector means "no duals
/// available", which callers must keep distinct from a dual of zero.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Primal values of variables indexed by their internal position.
    pub primal_values: Vec<f64>,
    /// Dual values of variables (reduced costs) indexed by their internal position.
    pub variable_duals: Vec<f64>,
    /// Dual values of constraints (shadow prices) indexed by their internal position.
    pub constraint_duals: Vec<f64>,
    /// Row activity values (constraint LHS evaluated at the solution).
    pub row_values: Vec<f64>,
    /// Objective value of the solution.
    pub objective_value: f64,
    /// Status of the solution.
    pub status: SolverStatus,
    /// Solve time in seconds.
    pub solve_time_seconds: f64,
}

impl Solution {
    /// Get the primal value at the given index.
    pub fn get_primal(&self, index: usize) -> Option<f64> {
        self.primal_values.get(index).copied()
    }

    /// Get the variable dual (reduced cost) at the given index.
    pub fn get_variable_dual(&self, index: usize) -> Option<f64> {
        self.variable_duals.get(index).copied()
    }

    /// Get the constraint dual (shadow price) at the given index.
    pub fn get_constraint_dual(&self, index: usize) -> Option<f64> {
        self.constraint_duals.get(index).copied()
    }

    /// Get the row activity value at the given index.
    pub fn get_row_value(&self, index: usize) -> Option<f64> {
        self.row_values.get(index).copied()
    }

    /// Whether the backend reported any constraint duals at all.
    pub fn has_duals(&self) -> bool {
        !self.constraint_duals.is_empty()
    }

    /// Check if the solution is optimal.
    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    /// Check if the solution is feasible.
    pub fn is_feasible(&self) -> bool {
        self.status.is_feasible()
    }
}
