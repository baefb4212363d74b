//! SAT solver seam.
//!
//! The engine only needs "satisfiable with this assignment" or
//! "unsatisfiable" for a clause set. [`DpllSolver`] answers in process for
//! small problems; [`ExternalSolver`] pipes DIMACS into any solver binary
//! that prints SAT-competition style output.

mod dpll;
mod external;

pub use dpll::DpllSolver;
pub use external::ExternalSolver;

use crate::error::{SolverError, SolverResult};
use flowsat_encoding::Cnf;

/// Outcome of one solve call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolverResponse {
    /// Whitespace-separated signed literals terminated by `0`
    Satisfiable(String),
    Unsatisfiable,
}

impl SolverResponse {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SolverResponse::Satisfiable(_))
    }
}

/// A SAT solver backend
pub trait SatSolver: Send + Sync {
    /// Solve `cnf` over variables `1..=variables`.
    ///
    /// Variables that appear in no clause still get a value in the returned
    /// assignment.
    fn solve(&self, cnf: &Cnf, variables: usize) -> SolverResult<SolverResponse>;

    /// Name of this backend for logging
    fn name(&self) -> &str;
}

/// Parse solver output.
///
/// Accepts SAT-competition output (`s SATISFIABLE` / `s UNSATISFIABLE`
/// status plus `v` value lines, `c` comments) as well as the two-line
/// `SAT` / `UNSAT` result file some solvers write.
pub fn parse_solver_output(text: &str) -> SolverResult<SolverResponse> {
    let mut satisfiable: Option<bool> = None;
    let mut values: Vec<&str> = Vec::new();

    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if let Some(status) = line.strip_prefix("s ") {
            satisfiable = Some(match status.trim() {
                "SATISFIABLE" => true,
                "UNSATISFIABLE" => false,
                other => {
                    return Err(SolverError::MalformedOutput(format!(
                        "unsupported status '{}'",
                        other
                    )))
                }
            });
        } else if let Some(rest) = line.strip_prefix("v ") {
            values.extend(rest.split_whitespace());
        } else if line == "SAT" {
            satisfiable = Some(true);
        } else if line == "UNSAT" {
            satisfiable = Some(false);
        } else if satisfiable == Some(true) {
            values.extend(line.split_whitespace());
        } else {
            return Err(SolverError::MalformedOutput(format!("unexpected line '{}'", line)));
        }
    }

    match satisfiable {
        None => Err(SolverError::MalformedOutput("no status line".into())),
        Some(false) => Ok(SolverResponse::Unsatisfiable),
        Some(true) => {
            if values.last() != Some(&"0") {
                values.push("0");
            }
            Ok(SolverResponse::Satisfiable(values.join(" ")))
        }
    }
}
