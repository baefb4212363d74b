//! Workflow inputs (leading memory block) and required outputs (trailing
//! used block).

use crate::{Atom, AtomMapping, Automaton, Block, Clause, ConstraintError, RejectedEntry};
use flowsat_taxonomy::{DataSlot, Domain, NodeId};

/// Unit clauses placing each input slot's types in `Mem₀`. Slots past the
/// declared inputs, and slots that name an unknown type, are forced empty.
pub fn workflow_inputs(
    slots: &[DataSlot],
    domain: &Domain,
    automaton: &Automaton,
    mapping: &mut AtomMapping,
    rejected: &mut Vec<RejectedEntry>,
) -> Vec<Clause> {
    let mut clauses = Vec::new();
    let Some(block) = automaton.types.input_block() else {
        return clauses;
    };
    check_fits("input", slots, block, rejected);

    for (i, state) in block.states().iter().enumerate() {
        let accepted = match slots.get(i) {
            Some(slot) => match resolve(slot, domain) {
                Ok(()) => Some(slot).filter(|s| !s.types.is_empty()),
                Err(error) => {
                    report(format!("input slot {}", i), error, rejected);
                    None
                }
            },
            None => None,
        };
        match accepted {
            Some(slot) => {
                for t in &slot.types {
                    clauses.push(Clause::unit(mapping.node(t, state)));
                }
            }
            None => clauses.push(Clause::unit(mapping.node(domain.types.empty_id(), state))),
        }
    }
    clauses
}

/// Whether at least one input slot places data in `Mem₀`
pub fn has_workflow_inputs(slots: &[DataSlot], domain: &Domain, automaton: &Automaton) -> bool {
    let capacity = automaton.types.input_block().map_or(0, |b| b.len());
    slots
        .iter()
        .take(capacity)
        .any(|slot| !slot.types.is_empty() && resolve(slot, domain).is_ok())
}

/// One clause per required output type: the type appears somewhere in the
/// workflow output block.
pub fn workflow_outputs(
    slots: &[DataSlot],
    domain: &Domain,
    automaton: &Automaton,
    mapping: &mut AtomMapping,
    rejected: &mut Vec<RejectedEntry>,
) -> Vec<Clause> {
    let mut clauses = Vec::new();
    let Some(block) = automaton.types.output_block() else {
        return clauses;
    };
    check_fits("output", slots, block, rejected);

    for (i, slot) in slots.iter().take(block.len()).enumerate() {
        if let Err(error) = resolve(slot, domain) {
            report(format!("output slot {}", i), error, rejected);
            continue;
        }
        for t in &slot.types {
            let atoms: Vec<Atom> = block.states().iter().map(|s| mapping.node(t, s)).collect();
            clauses.push(Clause::from_literals(atoms.into_iter().map(i64::from)));
        }
    }
    clauses
}

fn resolve(slot: &DataSlot, domain: &Domain) -> Result<(), ConstraintError> {
    match slot.types.iter().find(|t| domain.types.get(t).is_none()) {
        Some(unknown) => Err(ConstraintError::UnknownType(NodeId::clone(unknown))),
        None => Ok(()),
    }
}

fn check_fits(kind: &str, slots: &[DataSlot], block: &Block, rejected: &mut Vec<RejectedEntry>) {
    if slots.len() > block.len() {
        report(
            format!("{} slots {}..{}", kind, block.len(), slots.len()),
            ConstraintError::TooManySlots(slots.len(), block.len()),
            rejected,
        );
    }
}

fn report(entry: String, error: ConstraintError, rejected: &mut Vec<RejectedEntry>) {
    tracing::warn!(entry = %entry, error = %error, "Workflow I/O slot skipped");
    rejected.push(RejectedEntry::new(entry, error));
}
