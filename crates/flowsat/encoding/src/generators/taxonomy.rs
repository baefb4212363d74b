//! Taxonomy closure: a node holds at a state iff one of its children does.

use crate::{AtomMapping, Clause, EncodingError, EncodingResult, State};
use flowsat_taxonomy::{NodeId, Predicate, Registry, TaxonomyError};
use std::collections::HashSet;

/// Emit `¬parent ∨ child₁ ∨ … ∨ childₙ` and `¬childᵢ ∨ parent` for every
/// inner node reachable from `root`, at every state in `states`.
///
/// An abstract node without children can never hold and gets `¬node`.
/// Traversal uses an explicit worklist; a node shared by several parents is
/// expanded once per state.
pub fn taxonomy_closure<N: Predicate>(
    registry: &Registry<N>,
    root: &NodeId,
    states: &[State],
    mapping: &mut AtomMapping,
) -> EncodingResult<Vec<Clause>> {
    if !registry.contains(root) {
        return Err(EncodingError::UnknownRoot(root.clone()));
    }

    let mut clauses = Vec::new();
    for state in states {
        let mut expanded: HashSet<&NodeId> = HashSet::new();
        let mut worklist = vec![root];

        while let Some(id) = worklist.pop() {
            if !expanded.insert(id) {
                continue;
            }
            let node = registry
                .get(id)
                .ok_or_else(|| TaxonomyError::NodeNotFound(id.clone()))?;
            if node.children().is_empty() {
                if node.kind().accepts_children() {
                    clauses.push(Clause::new().neg(mapping.node(id, state)));
                }
                continue;
            }

            let parent = mapping.node(id, state);
            let children: Vec<_> = node
                .children()
                .iter()
                .map(|child| mapping.node(child, state))
                .collect();
            clauses.push(Clause::implies_any(parent, children.iter().copied()));
            for (child, atom) in node.children().iter().zip(children) {
                clauses.push(Clause::new().neg(atom).pos(parent));
                worklist.push(child);
            }
        }
    }
    Ok(clauses)
}
