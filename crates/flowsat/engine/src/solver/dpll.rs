//! Small in-process DPLL solver.
//!
//! Unit propagation plus chronological backtracking over an explicit
//! decision stack. Good enough for short workflows over small domains and
//! fully deterministic, which keeps enumeration order stable in tests.

use super::{SatSolver, SolverResponse};
use crate::error::{SolverError, SolverResult};
use flowsat_encoding::Cnf;

/// Built-in reference solver
#[derive(Clone, Debug)]
pub struct DpllSolver {
    max_decisions: u64,
}

impl DpllSolver {
    pub fn new() -> Self {
        Self {
            max_decisions: 1_000_000,
        }
    }

    /// Give up with [`SolverError::LimitExceeded`] after this many decisions
    pub fn with_max_decisions(mut self, max_decisions: u64) -> Self {
        self.max_decisions = max_decisions;
        self
    }
}

impl Default for DpllSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SatSolver for DpllSolver {
    fn solve(&self, cnf: &Cnf, variables: usize) -> SolverResult<SolverResponse> {
        let variables = variables.max(cnf.max_atom() as usize);
        let clauses: Vec<&[i64]> = cnf.clauses().iter().map(|c| c.literals()).collect();
        if clauses.iter().any(|c| c.is_empty()) {
            return Ok(SolverResponse::Unsatisfiable);
        }

        let mut search = Search {
            clauses,
            values: vec![None; variables + 1],
            trail: Vec::new(),
            decisions: 0,
            max_decisions: self.max_decisions,
        };
        if !search.run()? {
            tracing::debug!(decisions = search.decisions, "DPLL: unsatisfiable");
            return Ok(SolverResponse::Unsatisfiable);
        }

        tracing::debug!(decisions = search.decisions, "DPLL: satisfiable");
        let mut assignment: Vec<String> = (1..=variables)
            .map(|v| {
                if search.values[v] == Some(true) {
                    v.to_string()
                } else {
                    format!("-{}", v)
                }
            })
            .collect();
        assignment.push("0".into());
        Ok(SolverResponse::Satisfiable(assignment.join(" ")))
    }

    fn name(&self) -> &str {
        "dpll"
    }
}

struct Decision {
    trail_len: usize,
    literal: i64,
    flipped: bool,
}

struct Search<'a> {
    clauses: Vec<&'a [i64]>,
    /// Indexed by variable; slot 0 unused
    values: Vec<Option<bool>>,
    /// Assigned variables in assignment order
    trail: Vec<usize>,
    decisions: u64,
    max_decisions: u64,
}

impl Search<'_> {
    fn run(&mut self) -> SolverResult<bool> {
        let mut stack: Vec<Decision> = Vec::new();
        loop {
            if !self.propagate() {
                // Backtrack to the most recent decision not yet flipped.
                loop {
                    let Some(decision) = stack.pop() else {
                        return Ok(false);
                    };
                    self.undo(decision.trail_len);
                    if !decision.flipped {
                        stack.push(Decision {
                            trail_len: decision.trail_len,
                            literal: -decision.literal,
                            flipped: true,
                        });
                        self.assign(-decision.literal);
                        break;
                    }
                }
                continue;
            }

            let Some(literal) = self.pick_branch() else {
                return Ok(true);
            };
            self.decisions += 1;
            if self.decisions > self.max_decisions {
                return Err(SolverError::LimitExceeded(self.max_decisions));
            }
            stack.push(Decision {
                trail_len: self.trail.len(),
                literal,
                flipped: false,
            });
            self.assign(literal);
        }
    }

    fn value(&self, literal: i64) -> Option<bool> {
        self.values[literal.unsigned_abs() as usize].map(|v| v == (literal > 0))
    }

    fn assign(&mut self, literal: i64) {
        let variable = literal.unsigned_abs() as usize;
        self.values[variable] = Some(literal > 0);
        self.trail.push(variable);
    }

    fn undo(&mut self, trail_len: usize) {
        while self.trail.len() > trail_len {
            if let Some(variable) = self.trail.pop() {
                self.values[variable] = None;
            }
        }
    }

    /// Assign unit literals until fixpoint. Returns `false` on conflict.
    fn propagate(&mut self) -> bool {
        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..self.clauses.len() {
                let clause = self.clauses[i];
                let mut unassigned = None;
                let mut open = 0;
                let mut satisfied = false;
                for &literal in clause {
                    match self.value(literal) {
                        Some(true) => {
                            satisfied = true;
                            break;
                        }
                        Some(false) => {}
                        None => {
                            open += 1;
                            unassigned = Some(literal);
                        }
                    }
                }
                if satisfied {
                    continue;
                }
                match (open, unassigned) {
                    (0, _) => return false,
                    (1, Some(literal)) => {
                        self.assign(literal);
                        changed = true;
                    }
                    _ => {}
                }
            }
        }
        true
    }

    /// First unassigned literal of the first clause not yet satisfied
    fn pick_branch(&self) -> Option<i64> {
        self.clauses
            .iter()
            .filter(|clause| !clause.iter().any(|l| self.value(*l) == Some(true)))
            .find_map(|clause| clause.iter().copied().find(|l| self.value(*l).is_none()))
    }
}
