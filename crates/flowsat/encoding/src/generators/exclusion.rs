//! At most one tool per step, at most one type per dimension per slot.

use crate::{Automaton, AtomMapping, Clause, State};
use flowsat_taxonomy::{Domain, NodeId};

/// `¬a ∨ ¬b` for every unordered pair of distinct tools at every module state
pub fn tool_exclusion(domain: &Domain, automaton: &Automaton, mapping: &mut AtomMapping) -> Vec<Clause> {
    let tools: Vec<&NodeId> = domain.modules.tools().map(|m| &m.id).collect();
    let mut clauses = Vec::new();
    for state in automaton.modules.states() {
        pairwise(&tools, state, mapping, &mut clauses);
    }
    clauses
}

/// `¬a ∨ ¬b` for every pair of simple types (or the sentinel) sharing a
/// dimension, at every memory and used state
pub fn type_exclusion(domain: &Domain, automaton: &Automaton, mapping: &mut AtomMapping) -> Vec<Clause> {
    let groups: Vec<Vec<&NodeId>> = domain
        .types
        .dimensions()
        .iter()
        .map(|d| domain.types.types_in_dimension(d).into_iter().map(|t| &t.id).collect())
        .collect();

    let mut clauses = Vec::new();
    for state in automaton.types.all_states() {
        for group in &groups {
            pairwise(group, &state, mapping, &mut clauses);
        }
    }
    clauses
}

fn pairwise(nodes: &[&NodeId], state: &State, mapping: &mut AtomMapping, out: &mut Vec<Clause>) {
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            let a = mapping.node(a, state);
            let b = mapping.node(b, state);
            out.push(Clause::not_both(a, b));
        }
    }
}
