//! Property tests: blocking clauses enumerate every tool sequence exactly
//! once before the solver reports UNSAT.

use flowsat_engine::{DpllSolver, SynthesisConfig, SynthesisEngine};
use flowsat_tests::flat_domain;
use proptest::prelude::*;
use std::collections::HashSet;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn every_sequence_found_once(
        tools in 1usize..4,
        length in 1usize..3,
    ) {
        let engine = SynthesisEngine::new(
            flat_domain(tools, 0).unwrap(),
            SynthesisConfig::default().with_branching(1, 1),
            Box::new(DpllSolver::new()),
        )
        .unwrap();
        let outcome = engine.enumerate(length, 100).unwrap();

        let expected = tools.pow(length as u32);
        prop_assert!(outcome.report.exhausted);
        prop_assert_eq!(outcome.solutions.len(), expected);

        let fingerprints: HashSet<_> = outcome
            .solutions
            .iter()
            .filter_map(|s| s.fingerprint())
            .collect();
        prop_assert_eq!(fingerprints.len(), expected);
    }

    #[test]
    fn quota_stops_enumeration_early(
        quota in 1usize..4,
    ) {
        let engine = SynthesisEngine::new(
            flat_domain(3, 0).unwrap(),
            SynthesisConfig::default().with_branching(1, 1),
            Box::new(DpllSolver::new()),
        )
        .unwrap();
        let outcome = engine.enumerate(2, quota).unwrap();
        prop_assert_eq!(outcome.solutions.len(), quota);
        prop_assert!(!outcome.report.exhausted);
    }
}
