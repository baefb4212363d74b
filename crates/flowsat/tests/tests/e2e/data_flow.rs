//! E2E: pipeline versus shared-memory data flow, workflow inputs and outputs.

use flowsat_encoding::{Branching, ConstraintSpec, State};
use flowsat_engine::{DpllSolver, SynthesisConfig, SynthesisEngine};
use flowsat_taxonomy::{DataSlot, NodeId};
use flowsat_tests::relay_domain;

fn make_engine(config: SynthesisConfig) -> SynthesisEngine {
    SynthesisEngine::new(
        relay_domain().unwrap(),
        config.with_branching(1, 1),
        Box::new(DpllSolver::new()),
    )
    .unwrap()
}

/// produce, then spacer, then consume
fn relay_constraints(config: SynthesisConfig) -> SynthesisConfig {
    config
        .with_constraint(ConstraintSpec::new("first-module", ["produce"]))
        .with_constraint(ConstraintSpec::new("use-module", ["spacer"]))
        .with_constraint(ConstraintSpec::new("last-module", ["consume"]))
}

fn sequences(engine: &SynthesisEngine, length: usize) -> Vec<Vec<String>> {
    let outcome = engine.enumerate(length, 50).unwrap();
    assert!(outcome.report.exhausted);
    outcome
        .solutions
        .iter()
        .map(|s| s.tool_sequence().iter().map(|t| t.to_string()).collect())
        .collect()
}

#[test]
fn pipeline_cannot_reach_past_the_previous_step() {
    let engine = make_engine(relay_constraints(SynthesisConfig::default()));
    assert!(sequences(&engine, 3).is_empty());
}

#[test]
fn shared_memory_reads_any_earlier_output() {
    let engine = make_engine(relay_constraints(
        SynthesisConfig::default().with_shared_memory(true),
    ));
    assert_eq!(sequences(&engine, 3), vec![vec!["produce", "spacer", "consume"]]);
}

#[test]
fn pipeline_accepts_adjacent_producer() {
    let engine = make_engine(
        SynthesisConfig::default()
            .with_constraint(ConstraintSpec::new("first-module", ["produce"]))
            .with_constraint(ConstraintSpec::new("last-module", ["consume"])),
    );
    assert_eq!(sequences(&engine, 2), vec![vec!["produce", "consume"]]);
}

#[test]
fn consumer_cannot_run_first_without_inputs() {
    let engine = make_engine(
        SynthesisConfig::default().with_constraint(ConstraintSpec::new("use-module", ["consume"])),
    );
    assert!(sequences(&engine, 1).is_empty());
}

#[test]
fn required_output_drives_the_search() {
    let mut engine = make_engine(
        SynthesisConfig::default()
            .with_lengths(1, 3)
            .with_max_solutions(10)
            .with_output(DataSlot::new(["c"])),
    );
    let run = engine.run().unwrap();

    let per_length: Vec<usize> = run.lengths.iter().map(|r| r.solutions).collect();
    assert_eq!(per_length, vec![0, 1, 2]);
    assert!(run.lengths.iter().all(|r| r.exhausted));

    let mut sequences = run.tool_sequences();
    sequences.sort();
    assert_eq!(
        sequences,
        vec![
            vec!["produce", "consume"],
            vec!["produce", "produce", "consume"],
            vec!["spacer", "produce", "consume"],
        ]
    );
}

#[test]
fn workflow_view_tracks_data_between_steps() {
    let engine = make_engine(SynthesisConfig::default().with_output(DataSlot::new(["c"])));
    let outcome = engine.enumerate(2, 1).unwrap();
    let workflow = outcome.solutions[0].workflow();
    let b = Branching::new(1, 1);

    assert_eq!(workflow.to_string(), "produce -> consume");
    assert!(workflow.inputs.is_empty());
    assert_eq!(workflow.steps[0].produced[0].types, vec![NodeId::new("a")]);
    assert_eq!(workflow.steps[1].consumed[0].types, vec![NodeId::new("a")]);
    assert_eq!(workflow.steps[1].consumed[0].source, Some(State::memory(1, 0, b)));
    assert_eq!(workflow.outputs[0].types, vec![NodeId::new("c")]);
    assert_eq!(workflow.outputs[0].source, Some(State::memory(2, 0, b)));
}

#[test]
fn workflow_inputs_feed_the_first_step() {
    let engine = make_engine(
        SynthesisConfig::default()
            .with_input(DataSlot::new(["a"]))
            .with_output(DataSlot::new(["c"])),
    );
    let outcome = engine.enumerate(1, 5).unwrap();
    assert_eq!(outcome.solutions.len(), 1);

    let workflow = outcome.solutions[0].workflow();
    assert_eq!(workflow.to_string(), "consume");
    assert_eq!(workflow.inputs[0].types, vec![NodeId::new("a")]);
    assert_eq!(
        workflow.steps[0].consumed[0].source,
        Some(State::memory(0, 0, Branching::new(1, 1)))
    );
}

#[test]
fn unknown_input_type_supplies_no_data() {
    let engine = make_engine(
        SynthesisConfig::default()
            .with_input(DataSlot::new(["gif"]))
            .with_output(DataSlot::new(["c"])),
    );
    let outcome = engine.enumerate(1, 5).unwrap();

    // Same as a workflow without inputs: nothing can consume at step 0.
    assert!(outcome.solutions.is_empty());
    assert!(outcome.report.exhausted);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].entry, "input slot 0");
}

#[test]
fn unknown_input_type_leaves_input_block_empty() {
    let engine = make_engine(SynthesisConfig::default().with_input(DataSlot::new(["gif"])));
    let outcome = engine.enumerate(1, 5).unwrap();

    assert_eq!(outcome.solutions.len(), 2);
    for solution in &outcome.solutions {
        let workflow = solution.workflow();
        assert!(workflow.inputs.is_empty());
        assert_ne!(workflow.to_string(), "consume");
    }
}

#[test]
fn unknown_output_type_is_reported_and_unconstrained() {
    let engine = make_engine(SynthesisConfig::default().with_output(DataSlot::new(["gif"])));
    let outcome = engine.enumerate(1, 5).unwrap();

    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].entry, "output slot 0");
    let mut sequences: Vec<String> = outcome
        .solutions
        .iter()
        .map(|s| s.tool_sequence()[0].to_string())
        .collect();
    sequences.sort();
    assert_eq!(sequences, vec!["produce", "spacer"]);
}
