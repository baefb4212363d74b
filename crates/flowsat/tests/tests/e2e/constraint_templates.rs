//! E2E: every constraint template narrows the enumerated workflows.

use flowsat_encoding::{ConstraintError, ConstraintSpec, ConstraintTemplate};
use flowsat_engine::{DpllSolver, SynthesisConfig, SynthesisEngine};
use flowsat_taxonomy::Domain;
use flowsat_tests::{flat_domain, relay_domain};

fn enumerate_all(domain: Domain, constraints: &[ConstraintSpec], length: usize) -> Vec<Vec<String>> {
    let mut config = SynthesisConfig::default().with_branching(1, 1);
    for c in constraints {
        config = config.with_constraint(c.clone());
    }
    let engine = SynthesisEngine::new(domain, config, Box::new(DpllSolver::new())).unwrap();
    let outcome = engine.enumerate(length, 100).unwrap();
    assert!(outcome.report.exhausted);
    assert!(outcome.rejected.is_empty());

    let mut sequences: Vec<Vec<String>> = outcome
        .solutions
        .iter()
        .map(|s| s.tool_sequence().iter().map(|t| t.to_string()).collect())
        .collect();
    sequences.sort();
    sequences
}

fn three_tools() -> Domain {
    flat_domain(3, 0).unwrap()
}

#[test]
fn unconstrained_length_two_has_every_pair() {
    assert_eq!(enumerate_all(three_tools(), &[], 2).len(), 9);
}

#[test]
fn use_module_requires_an_occurrence() {
    let sequences = enumerate_all(three_tools(), &[ConstraintSpec::new("use-module", ["t0"])], 2);
    assert_eq!(sequences.len(), 5);
    assert!(sequences.iter().all(|s| s.contains(&"t0".to_string())));
}

#[test]
fn not_use_module_removes_the_tool() {
    let sequences = enumerate_all(three_tools(), &[ConstraintSpec::new("not-use-module", ["t0"])], 2);
    assert_eq!(sequences.len(), 4);
    assert!(sequences.iter().all(|s| !s.contains(&"t0".to_string())));
}

#[test]
fn first_and_last_module_pin_the_ends() {
    let first = enumerate_all(three_tools(), &[ConstraintSpec::new("first-module", ["t1"])], 2);
    assert_eq!(first.len(), 3);
    assert!(first.iter().all(|s| s[0] == "t1"));

    let last = enumerate_all(three_tools(), &[ConstraintSpec::new("last-module", ["t2"])], 2);
    assert_eq!(last.len(), 3);
    assert!(last.iter().all(|s| s[1] == "t2"));
}

#[test]
fn abstract_module_parameter_matches_any_descendant() {
    // t0 and t1 sit below "group"
    let domain = flat_domain(3, 2).unwrap();
    let sequences = enumerate_all(domain, &[ConstraintSpec::new("not-use-module", ["group"])], 2);
    assert_eq!(sequences, vec![vec!["t2", "t2"]]);
}

#[test]
fn next_module_is_strong() {
    let sequences = enumerate_all(three_tools(), &[ConstraintSpec::new("next-module", ["t0", "t1"])], 2);
    assert_eq!(sequences.len(), 5);
    for s in &sequences {
        assert_ne!(s[1], "t0");
        if s[0] == "t0" {
            assert_eq!(s[1], "t1");
        }
    }
}

#[test]
fn if_then_module_needs_a_later_step() {
    let sequences = enumerate_all(three_tools(), &[ConstraintSpec::new("if-then-module", ["t0", "t2"])], 3);
    for s in &sequences {
        if let Some(i) = s.iter().position(|t| t == "t0") {
            assert!(s[i + 1..].contains(&"t2".to_string()));
        }
    }
    assert!(sequences.iter().all(|s| s[2] != "t0"));
    assert!(sequences.contains(&vec!["t0".to_string(), "t1".into(), "t2".into()]));
}

#[test]
fn generate_type_requires_a_producing_step() {
    let sequences = enumerate_all(relay_domain().unwrap(), &[ConstraintSpec::new("generate-type", ["c"])], 2);
    assert_eq!(sequences, vec![vec!["produce", "consume"]]);
}

#[test]
fn not_use_type_bans_producers_and_consumers() {
    let sequences = enumerate_all(relay_domain().unwrap(), &[ConstraintSpec::new("not-use-type", ["a"])], 2);
    assert_eq!(sequences, vec![vec!["spacer", "spacer"]]);
}

#[test]
fn use_type_forces_the_type_somewhere() {
    let sequences = enumerate_all(relay_domain().unwrap(), &[ConstraintSpec::new("use-type", ["b"])], 1);
    assert_eq!(sequences, vec![vec!["spacer"]]);
}

#[test]
fn malformed_constraints_are_reported_not_applied() {
    let config = SynthesisConfig::default()
        .with_branching(1, 1)
        .with_lengths(1, 1)
        .with_max_solutions(10)
        .with_constraint(ConstraintSpec::new("use-modul", ["t0"]))
        .with_constraint(ConstraintSpec::new("use-module", ["t0", "t1"]))
        .with_constraint(ConstraintSpec::new("use-module", ["ghost"]))
        .with_constraint(ConstraintSpec::new("use-type", ["t0"]));
    let mut engine = SynthesisEngine::new(three_tools(), config, Box::new(DpllSolver::new())).unwrap();
    let run = engine.run().unwrap();

    assert_eq!(run.solutions.len(), 3);
    let errors: Vec<_> = run.rejected.iter().map(|r| r.error.clone()).collect();
    assert_eq!(errors.len(), 4);
    assert!(matches!(errors[0], ConstraintError::UnknownTemplate(_)));
    assert!(matches!(
        errors[1],
        ConstraintError::ArityMismatch { expected: 1, found: 2, .. }
    ));
    assert!(matches!(errors[2], ConstraintError::UnknownModule(_)));
    assert!(matches!(errors[3], ConstraintError::UnknownType(_)));
    assert_eq!(run.rejected[0].entry, "use-modul(t0)");
}

#[test]
fn template_catalogue_is_complete() {
    assert_eq!(ConstraintTemplate::ALL.len(), 9);
    for template in ConstraintTemplate::ALL {
        assert_eq!(ConstraintTemplate::from_id(template.id()), Some(template));
        let placeholders = template.description().matches("${").count();
        assert_eq!(placeholders, template.arity());
    }
}
