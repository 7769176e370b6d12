//! The external solver boundary.

use crate::{Solution, SolverConfig, SolverError};

/// A lowered problem handed to a backend: column bounds, objective row,
/// sparse constraint rows with row bounds, and the objective direction.
///
/// This is the fixed I/O shape at the solver boundary; how a backend turns
/// it into a solve (FFI, subprocess, network) is its own business.
#[derive(Debug, Clone)]
pub struct LoweredProblem {
    /// Per-column (lower, upper) bounds.
    pub column_bounds: Vec<(f64, f64)>,
    /// Per-column objective coefficients.
    pub objective: Vec<f64>,
    /// `true` to maximize, `false` to minimize.
    pub maximize: bool,
    /// Sparse rows: (column index, coefficient) pairs per constraint.
    pub rows: Vec<Vec<(usize, f64)>>,
    /// Per-row (lower, upper) bounds.
    pub row_bounds: Vec<(f64, f64)>,
}

/// Trait implemented by solver backends.
///
/// No real backend ships in this workspace; the trait exists so callers can
/// plug in an external solver and so tests can substitute fixtures.
pub trait SolveBackend {
    /// Solve the lowered problem with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a `SolverError` when the solve terminates without a usable
    /// solution or the backend itself fails.
    fn solve(
        &mut self,
        problem: &LoweredProblem,
        config: &SolverConfig,
    ) -> Result<Solution, SolverError>;
}
