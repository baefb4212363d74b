//! Property tests: in any model, each data slot carries exactly one type
//! per dimension (the empty sentinel included), and no step runs two tools.

use flowsat_encoding::{AtomRole, Branching, DataFlowMode, Encoder, EncodingOptions};
use flowsat_engine::{DpllSolver, SatSolver, Solution};
use flowsat_taxonomy::{DataSlot, NodeId};
use flowsat_tests::image_domain;
use proptest::prelude::*;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn arb_mode() -> impl Strategy<Value = DataFlowMode> {
    prop_oneof![Just(DataFlowMode::Pipeline), Just(DataFlowMode::GeneralMemory)]
}

/// An input item: optional format, optional content
fn arb_input() -> impl Strategy<Value = Option<DataSlot>> {
    prop_oneof![
        Just(None),
        Just(Some(DataSlot::new(["png", "photo"]))),
        Just(Some(DataSlot::new(["svg", "chart"]))),
        Just(Some(DataSlot::new(["jpeg"]))),
    ]
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn one_type_per_dimension_in_every_slot(
        length in 1usize..4,
        inputs in 1usize..3,
        mode in arb_mode(),
        input in arb_input(),
    ) {
        let domain = image_domain().unwrap();
        let mut options = EncodingOptions::new(mode);
        if let Some(slot) = input {
            options = options.with_input(slot);
        }
        let encoding = Encoder::new(&domain, &options)
            .encode(length, Branching::new(inputs, 1))
            .unwrap();
        let response = DpllSolver::new()
            .solve(&encoding.cnf, encoding.atom_count())
            .unwrap();
        let solution = Solution::from_response(&response, &encoding.mapping, &domain).unwrap();
        prop_assert!(solution.is_sat());

        let mut per_state: HashMap<_, HashMap<NodeId, usize>> = HashMap::new();
        let mut tools_per_step: HashMap<usize, usize> = HashMap::new();
        for literal in solution.literals().iter().filter(|l| !l.negated) {
            let Some(id) = literal.node() else { continue };
            match literal.key.role {
                AtomRole::MemoryType | AtomRole::UsedType => {
                    for dimension in domain.types.dimensions() {
                        let members = domain.types.types_in_dimension(dimension);
                        if members.iter().any(|t| &t.id == id) {
                            *per_state
                                .entry(*literal.state())
                                .or_default()
                                .entry(dimension.clone())
                                .or_default() += 1;
                        }
                    }
                }
                AtomRole::Module => {
                    if domain.modules.get(id).is_some_and(|m| m.is_tool()) {
                        *tools_per_step.entry(literal.state().block()).or_default() += 1;
                    }
                }
                AtomRole::MemoryReference => {}
            }
        }

        let type_states = encoding.automaton.types.all_states();
        prop_assert_eq!(per_state.len(), type_states.len());
        for state in &type_states {
            let counts = &per_state[state];
            for dimension in domain.types.dimensions() {
                prop_assert_eq!(counts.get(dimension).copied(), Some(1));
            }
        }
        prop_assert_eq!(tools_per_step.len(), length);
        prop_assert!(tools_per_step.values().all(|n| *n == 1));
    }
}
