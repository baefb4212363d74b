//! Temporal operators over a finite trace of atoms.
//!
//! `trace[i]` is the atom for "the proposition holds at position i"; the
//! operators return the clauses expressing the formula over the whole
//! trace.

use crate::{Atom, Clause};

/// `F p`: p holds somewhere
pub fn eventually(trace: &[Atom]) -> Vec<Clause> {
    vec![Clause::from_literals(trace.iter().map(|a| i64::from(*a)))]
}

/// `G ¬p`: p holds nowhere
pub fn never(trace: &[Atom]) -> Vec<Clause> {
    trace.iter().map(|a| Clause::new().neg(*a)).collect()
}

/// p holds at the given position
pub fn at(trace: &[Atom], position: usize) -> Vec<Clause> {
    trace.get(position).map(|a| vec![Clause::unit(*a)]).unwrap_or_else(|| vec![Clause::new()])
}

/// `G (p → X F q)`: every p is strictly followed by a q
pub fn followed_by(premise: &[Atom], consequence: &[Atom]) -> Vec<Clause> {
    premise
        .iter()
        .enumerate()
        .map(|(i, p)| Clause::implies_any(*p, consequence.iter().skip(i + 1).copied()))
        .collect()
}

/// `G (p → X q)` with a strong next: p cannot hold at the last position
pub fn next(premise: &[Atom], consequence: &[Atom]) -> Vec<Clause> {
    premise
        .iter()
        .enumerate()
        .map(|(i, p)| match consequence.get(i + 1) {
            Some(q) => Clause::new().neg(*p).pos(*q),
            None => Clause::new().neg(*p),
        })
        .collect()
}
