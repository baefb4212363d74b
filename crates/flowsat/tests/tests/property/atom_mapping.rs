//! Property tests: the atom table is a dense bijection and re-adding a key
//! never allocates.

use flowsat_encoding::{AtomMapping, Branching, State};
use flowsat_taxonomy::NodeId;
use proptest::prelude::*;
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
enum Fact {
    Tool(u8, usize),
    Type(u8, usize, usize),
    Reference(usize, usize),
}

fn arb_fact() -> impl Strategy<Value = Fact> {
    prop_oneof![
        (0u8..4, 0usize..3).prop_map(|(t, step)| Fact::Tool(t, step)),
        (0u8..4, 0usize..3, 0usize..2).prop_map(|(t, block, slot)| Fact::Type(t, block, slot)),
        (0usize..3, 0usize..3).prop_map(|(from, to)| Fact::Reference(from, to)),
    ]
}

fn add(mapping: &mut AtomMapping, fact: &Fact) -> u32 {
    let b = Branching::new(2, 2);
    match fact {
        Fact::Tool(t, step) => mapping.node(&NodeId::new(format!("tool{}", t)), &State::module(*step, b)),
        Fact::Type(t, block, slot) => {
            mapping.node(&NodeId::new(format!("type{}", t)), &State::memory(*block, *slot, b))
        }
        Fact::Reference(from, to) => {
            mapping.reference(&State::memory(*from, 0, b), &State::used(*to, 0, b))
        }
    }
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn atoms_are_dense_and_stable(facts in prop::collection::vec(arb_fact(), 1..60)) {
        let mut mapping = AtomMapping::new();
        let first: Vec<u32> = facts.iter().map(|f| add(&mut mapping, f)).collect();
        let size = mapping.len();

        // Re-adding in any order returns the same atoms without growth.
        for (fact, atom) in facts.iter().zip(&first).rev() {
            prop_assert_eq!(add(&mut mapping, fact), *atom);
        }
        prop_assert_eq!(mapping.len(), size);

        let distinct: HashSet<u32> = first.iter().copied().collect();
        prop_assert_eq!(distinct.len(), size);
        prop_assert_eq!(distinct.iter().max().copied(), Some(size as u32));
        prop_assert_eq!(distinct.iter().min().copied(), Some(1));
    }

    #[test]
    fn resolve_inverts_get(facts in prop::collection::vec(arb_fact(), 1..60)) {
        let mut mapping = AtomMapping::new();
        for fact in &facts {
            add(&mut mapping, fact);
        }
        for (atom, key) in mapping.iter() {
            prop_assert_eq!(mapping.get(key), Some(atom));
            prop_assert_eq!(mapping.resolve(atom), Some(key));
        }
        prop_assert!(mapping.resolve(0).is_none());
        prop_assert!(mapping.resolve(mapping.len() as u32 + 1).is_none());
    }
}
