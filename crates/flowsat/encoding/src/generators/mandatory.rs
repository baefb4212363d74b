//! Every module state runs a tool and every type state is classified.

use crate::{Automaton, AtomMapping, Clause};
use flowsat_taxonomy::Domain;

/// Unit clauses forcing the tool root at every module state and each
/// dimension root at every memory and used state.
///
/// Together with the taxonomy closure this makes every step select exactly
/// one tool and every slot exactly one type per dimension (possibly empty).
pub fn mandatory_usage(domain: &Domain, automaton: &Automaton, mapping: &mut AtomMapping) -> Vec<Clause> {
    let mut clauses = Vec::new();
    for state in automaton.modules.states() {
        clauses.push(Clause::unit(mapping.node(domain.modules.root(), state)));
    }
    for state in automaton.types.all_states() {
        for dimension in domain.types.dimensions() {
            clauses.push(Clause::unit(mapping.node(dimension, &state)));
        }
    }
    clauses
}
