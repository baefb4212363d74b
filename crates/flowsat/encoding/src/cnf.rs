//! Clauses and the append-only clause set handed to solvers.

use crate::Atom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Disjunction of signed atoms
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    literals: Vec<i64>,
}

impl Clause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clause over already signed literals
    pub fn from_literals(literals: impl IntoIterator<Item = i64>) -> Self {
        Self {
            literals: literals.into_iter().collect(),
        }
    }

    /// Single positive literal
    pub fn unit(atom: Atom) -> Self {
        Self::new().pos(atom)
    }

    /// `¬a ∨ ¬b`
    pub fn not_both(a: Atom, b: Atom) -> Self {
        Self::new().neg(a).neg(b)
    }

    /// `¬premise ∨ c₁ ∨ … ∨ cₙ`
    pub fn implies_any(premise: Atom, consequences: impl IntoIterator<Item = Atom>) -> Self {
        let mut clause = Self::new().neg(premise);
        clause.extend_pos(consequences);
        clause
    }

    pub fn pos(mut self, atom: Atom) -> Self {
        self.literals.push(i64::from(atom));
        self
    }

    pub fn neg(mut self, atom: Atom) -> Self {
        self.literals.push(-i64::from(atom));
        self
    }

    pub fn extend_pos(&mut self, atoms: impl IntoIterator<Item = Atom>) {
        self.literals.extend(atoms.into_iter().map(i64::from));
    }

    pub fn literals(&self) -> &[i64] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Largest atom mentioned
    pub fn max_atom(&self) -> Atom {
        self.literals
            .iter()
            .map(|l| l.unsigned_abs() as Atom)
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for literal in &self.literals {
            write!(f, "{} ", literal)?;
        }
        write!(f, "0")
    }
}

/// Growing set of clauses for one automaton
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cnf {
    clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn extend(&mut self, clauses: impl IntoIterator<Item = Clause>) {
        self.clauses.extend(clauses);
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn max_atom(&self) -> Atom {
        self.clauses.iter().map(Clause::max_atom).max().unwrap_or(0)
    }

    /// One clause per line, `0`-terminated
    pub fn render(&self) -> String {
        let mut out = String::new();
        for clause in &self.clauses {
            out.push_str(&clause.to_string());
            out.push('\n');
        }
        out
    }

    /// DIMACS document declaring at least `variables` variables
    pub fn to_dimacs(&self, variables: usize) -> String {
        let variables = variables.max(self.max_atom() as usize);
        format!("p cnf {} {}\n{}", variables, self.clauses.len(), self.render())
    }
}
