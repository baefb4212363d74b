//! Property tests: every step of a solution runs exactly one concrete tool,
//! and an abstract operation holds exactly when one of its tools does.

use flowsat_encoding::{Branching, Encoder, EncodingOptions, Label};
use flowsat_engine::{DpllSolver, SatSolver, Solution};
use flowsat_tests::flat_domain;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// (tool count, how many of them are grouped)
fn arb_tools() -> impl Strategy<Value = (usize, usize)> {
    (1usize..5).prop_flat_map(|count| (Just(count), 0..=count))
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn one_tool_per_step_and_closed_parents(
        (count, grouped) in arb_tools(),
        length in 1usize..4,
    ) {
        let domain = flat_domain(count, grouped).unwrap();
        let options = EncodingOptions::default();
        let encoding = Encoder::new(&domain, &options)
            .encode(length, Branching::new(1, 1))
            .unwrap();
        let response = DpllSolver::new()
            .solve(&encoding.cnf, encoding.atom_count())
            .unwrap();
        let solution = Solution::from_response(&response, &encoding.mapping, &domain).unwrap();

        prop_assert!(solution.is_sat());
        let tools = solution.tools();
        prop_assert_eq!(tools.len(), length);
        for (step, tool) in tools.iter().enumerate() {
            prop_assert_eq!(tool.state().block(), step);
        }

        // "group" is true at a step iff the tool there is one of t0..t{grouped-1}
        for tool in tools {
            let index: usize = tool.node().unwrap().as_str()[1..].parse().unwrap();
            let group_true = solution.literals().iter().any(|l| {
                !l.negated
                    && l.state() == tool.state()
                    && l.key.label == Label::Node("group".into())
            });
            prop_assert_eq!(group_true, index < grouped);
        }
    }
}
