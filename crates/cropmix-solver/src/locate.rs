//! Filesystem discovery of an installed solver binary.
//!
//! Installations keep solver executables in a `solvers/` (or `SOLVERS/`)
//! directory somewhere above the working tree, e.g.
//!
//! ```text
//! /home/user/optim/solvers/cplex
//! /home/user/optim/td1/        <- working directory
//! ```
//!
//! The search walks the parent chain of the start directory, nearest parent
//! first; the start directory itself is not searched.

use crate::SolverError;
use std::path::{Path, PathBuf};

/// Solver binary looked up when no name is given.
pub const DEFAULT_SOLVER: &str = "cplex";

const SOLVER_DIRS: [&str; 2] = ["solvers", "SOLVERS"];

/// Resolve the absolute path of a solver binary named `solver`, searching
/// the ancestors of `start`.
///
/// The platform executable suffix (`.exe` on Windows) is appended before
/// searching. The nearest ancestor containing a match wins; within one
/// ancestor, `solvers` is preferred over `SOLVERS`.
///
/// # Errors
///
/// Returns [`SolverError::BinaryNotFound`] naming an example expected
/// location when no ancestor holds the binary.
pub fn find_solver(solver: &str, start: &Path) -> Result<PathBuf, SolverError> {
    let file_name = format!("{solver}{}", std::env::consts::EXE_SUFFIX);
    let start = std::path::absolute(start)
        .map_err(|err| SolverError::Backend(format!("cannot resolve start directory: {err}")))?;

    for dir in start.ancestors().skip(1) {
        for solver_dir in SOLVER_DIRS {
            let candidate = dir.join(solver_dir).join(&file_name);
            if candidate.is_file() {
                tracing::debug!(
                    component = "locate",
                    operation = "find_solver",
                    status = "success",
                    path = %candidate.display(),
                    "Found solver binary"
                );
                return Ok(candidate);
            }
        }
    }

    let expected = start
        .parent()
        .unwrap_or(&start)
        .join(SOLVER_DIRS[0])
        .join(&file_name);
    Err(SolverError::BinaryNotFound {
        solver: solver.to_string(),
        expected,
    })
}

/// Resolve the default solver (`cplex`) from the current working directory.
pub fn find_default_solver() -> Result<PathBuf, SolverError> {
    let cwd = std::env::current_dir()
        .map_err(|err| SolverError::Backend(format!("cannot read working directory: {err}")))?;
    find_solver(DEFAULT_SOLVER, &cwd)
}
