//! Solver error types.

use crate::SolverStatus;
use std::path::PathBuf;

/// Error type for solver operations.
#[derive(Debug, Clone)]
pub enum SolverError {
    /// No installed solver binary was found on the ancestor search path.
    BinaryNotFound {
        /// Name of the solver binary that was looked for.
        solver: String,
        /// An example of where the binary was expected to live.
        expected: PathBuf,
    },
    /// Solver terminated without a usable solution.
    SolveFailure {
        /// The solver status that caused the failure.
        status: SolverStatus,
    },
    /// Backend-specific error not covered by other variants.
    Backend(String),
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::BinaryNotFound { .. } => "SOLVER_BINARY_NOT_FOUND",
            SolverError::SolveFailure { status } => match status {
                SolverStatus::Infeasible => "SOLVER_INFEASIBLE",
                SolverStatus::Unbounded => "SOLVER_UNBOUNDED",
                SolverStatus::ReachedTimeLimit => "SOLVER_TIME_LIMIT",
                _ => "SOLVER_FAILURE",
            },
            SolverError::Backend(_) => "SOLVER_BACKEND",
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::BinaryNotFound { solver, expected } => write!(
                f,
                "[{}] Cannot find the solver '{}'. Expected a solvers directory \
                 on the ancestor path, e.g. {}",
                self.code(),
                solver,
                expected.display()
            ),
            SolverError::SolveFailure { status } => {
                write!(f, "[{}] {}", self.code(), status_message(*status))
            }
            SolverError::Backend(msg) => {
                write!(f, "[{}] Solver backend error: {}", self.code(), msg)
            }
        }
    }
}

fn status_message(status: SolverStatus) -> &'static str {
    match status {
        SolverStatus::Infeasible => "Problem is infeasible",
        SolverStatus::Unbounded => "Problem is unbounded",
        SolverStatus::ReachedTimeLimit => "Solver reached time limit",
        SolverStatus::Unknown => "Solver status unknown",
        SolverStatus::Optimal => "Solver returned optimal",
    }
}

impl std::error::Error for SolverError {}
