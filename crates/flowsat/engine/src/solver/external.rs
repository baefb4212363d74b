//! Solver running as a child process.

use super::{parse_solver_output, SatSolver, SolverResponse};
use crate::error::{SolverError, SolverResult};
use flowsat_encoding::Cnf;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Any solver binary that reads DIMACS on stdin and prints
/// SAT-competition output on stdout (e.g. `kissat`, `cadical`, `minisat`
/// wrappers)
#[derive(Clone, Debug)]
pub struct ExternalSolver {
    program: PathBuf,
    args: Vec<String>,
    name: String,
}

impl ExternalSolver {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let name = program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "external".into());
        Self {
            program,
            args: Vec::new(),
            name,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl SatSolver for ExternalSolver {
    fn solve(&self, cnf: &Cnf, variables: usize) -> SolverResult<SolverResponse> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SolverError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(cnf.to_dimacs(variables).as_bytes()) {
                drop(stdin);
                // Reap the child before reporting; it may still be running.
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(solver = %self.name, error = %e, "Could not send problem to solver");
                return Err(e.into());
            }
        }
        let output = child.wait_with_output()?;

        // SAT-competition solvers exit with 10 / 20; only the output matters.
        tracing::debug!(
            solver = %self.name,
            status = ?output.status.code(),
            bytes = output.stdout.len(),
            "External solver finished"
        );
        parse_solver_output(&String::from_utf8_lossy(&output.stdout))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
