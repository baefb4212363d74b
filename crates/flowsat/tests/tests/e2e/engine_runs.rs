//! E2E: configured runs over a multi-dimension domain.

use flowsat_engine::{
    ConfigError, DpllSolver, EngineError, RunStatus, SynthesisConfig, SynthesisEngine,
};
use flowsat_tests::image_domain;

const CONFIG: &str = r#"{
    "data_dimensions": ["format", "content"],
    "solution_min_length": 1,
    "solution_max_length": 3,
    "max_solutions": 4,
    "max_tool_inputs": 1,
    "max_tool_outputs": 1,
    "inputs": [["png", "photo"]],
    "outputs": [["jpeg"]],
    "constraints": [
        {"template": "not-use-module", "parameters": ["render"]}
    ]
}"#;

fn make_engine(config: SynthesisConfig) -> SynthesisEngine {
    SynthesisEngine::new(image_domain().unwrap(), config, Box::new(DpllSolver::new())).unwrap()
}

#[test]
fn json_config_drives_a_full_run() {
    let config = SynthesisConfig::from_json_str(CONFIG).unwrap();
    let mut engine = make_engine(config);
    let run = engine.run().unwrap();

    assert!(run.rejected.is_empty());
    assert!(!run.is_empty());
    // A png photo becomes a jpeg only through png_to_jpeg.
    assert_eq!(run.solutions[0].length, 1);
    assert_eq!(run.tool_sequences()[0], vec!["png_to_jpeg"]);
    for found in &run.solutions {
        let tools = found.solution.tool_sequence();
        assert_eq!(tools.len(), found.length);
        assert!(tools.iter().all(|t| t.as_str() != "plot" && t.as_str() != "rasterize"));
        assert_eq!(tools.last().map(|t| t.as_str()), Some("png_to_jpeg"));
    }
    assert!(run.solutions.len() <= 4);

    let record = engine.find(&run.id).unwrap();
    assert_eq!(record.status, RunStatus::Completed);
    assert_eq!(record.solutions_found, run.solutions.len());
}

#[test]
fn parallel_sweep_matches_sequential_sweep() {
    let config = SynthesisConfig::from_json_str(CONFIG).unwrap();
    let sequential = make_engine(config.clone()).run().unwrap();
    let parallel = make_engine(config).run_parallel().unwrap();

    assert_eq!(sequential.tool_sequences(), parallel.tool_sequences());
    let fingerprints = |run: &flowsat_engine::SynthesisRun| -> Vec<_> {
        run.solutions.iter().map(|s| s.solution.fingerprint()).collect()
    };
    assert_eq!(fingerprints(&sequential), fingerprints(&parallel));
}

#[test]
fn workflow_input_types_stay_in_their_dimensions() {
    let config = SynthesisConfig::from_json_str(CONFIG).unwrap().with_lengths(1, 1);
    let run = make_engine(config).run().unwrap();
    let workflow = run.solutions[0].solution.workflow();

    let mut input_types: Vec<_> = workflow.inputs[0].types.iter().map(|t| t.as_str()).collect();
    input_types.sort();
    assert_eq!(input_types, vec!["photo", "png"]);
    assert!(workflow.outputs.iter().any(|o| o.types.iter().any(|t| t.as_str() == "jpeg")));
}

#[test]
fn dimension_mismatch_is_rejected_up_front() {
    let config = SynthesisConfig::default().with_dimensions(["format", "size"]);
    let err = SynthesisEngine::new(image_domain().unwrap(), config, Box::new(DpllSolver::new()))
        .err()
        .unwrap();
    assert!(matches!(err, EngineError::Config(ConfigError::InvalidValue { .. })));
}

#[test]
fn summary_counts_runs() {
    let config = SynthesisConfig::from_json_str(CONFIG).unwrap().with_lengths(1, 1);
    let mut engine = make_engine(config);
    engine.run().unwrap();
    engine.run_parallel().unwrap();

    let summary = engine.summary();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.total_solutions, 2);
    assert!(summary.to_string().starts_with("SynthesisSummary(total=2"));
}

#[test]
fn run_results_serialize_for_reporting() {
    let config = SynthesisConfig::from_json_str(CONFIG).unwrap().with_lengths(1, 1);
    let run = make_engine(config).run().unwrap();

    let found = serde_json::to_value(&run.solutions[0]).unwrap();
    assert_eq!(found["length"], 1);
    assert_eq!(found["index"], 0);
    assert_eq!(found["solution"]["Sat"]["tools"][0]["key"]["label"]["Node"], "png_to_jpeg");

    let report = serde_json::to_value(&run.lengths[0]).unwrap();
    assert_eq!(report["solutions"], 1);
    assert_eq!(report["exhausted"], true);
}
