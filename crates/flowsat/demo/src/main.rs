#![deny(unsafe_code)]
//! flowsat demo binary.
//!
//! Synthesises image-processing workflows from a small tool catalogue:
//! 1. Build the tool and data taxonomies
//! 2. Load a JSON run configuration
//! 3. Enumerate workflows with the built-in solver
//! 4. Compare pipeline and shared-memory data flow
//!
//! Set `RUST_LOG=flowsat_engine=info` to follow the engine.

mod catalogue;

use flowsat_engine::{
    DpllSolver, FoundSolution, LengthReport, SynthesisConfig, SynthesisEngine, SynthesisRun,
};
use tracing_subscriber::EnvFilter;

use catalogue::{image_catalogue, DATA_ROOT, TOOL_ROOT};

// ── Formatting Helpers ──────────────────────────────────────────────────

fn section(title: &str) {
    println!();
    println!(" ── {} {}", title, "─".repeat(56usize.saturating_sub(title.len())));
}

fn ok(msg: &str) {
    println!("   [OK]  {}", msg);
}

fn info(msg: &str) {
    println!("   [--]  {}", msg);
}

fn warn(msg: &str) {
    println!("   [!!]  {}", msg);
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run_demo() {
        eprintln!();
        eprintln!("   [FATAL]  Demo failed: {:#}", e);
        std::process::exit(1);
    }

    println!();
    println!("  Demo complete.");
    println!();
}

fn run_demo() -> anyhow::Result<()> {
    // ── Domain ──────────────────────────────────────────────────────
    section("Domain");

    let domain = image_catalogue()?;
    ok(&format!(
        "{} tools, {} simple types across dimensions {:?}",
        domain.modules.tools().count(),
        domain.types.simple_types().count(),
        domain.types.dimensions().iter().map(|d| d.as_str()).collect::<Vec<_>>(),
    ));

    // ── Configuration ───────────────────────────────────────────────
    section("Configuration");

    let json = serde_json::json!({
        "tool_taxonomy_root": TOOL_ROOT,
        "data_taxonomy_root": DATA_ROOT,
        "data_dimensions": ["format", "content"],
        "solution_min_length": 1,
        "solution_max_length": 4,
        "max_solutions": 6,
        "max_tool_inputs": 2,
        "max_tool_outputs": 1,
        "inputs": [["tiff", "picture"]],
        "outputs": [["jpeg"]],
        "constraints": [
            {"template": "not-use-module", "parameters": ["rendering"]},
            {"template": "use-module", "parameters": ["classify"]},
            {"template": "generate-type", "parameters": ["photo"]},
        ],
    });
    let config = SynthesisConfig::from_json_str(&json.to_string())?;
    info(&format!(
        "lengths {}..={}  quota {}  constraints {}",
        config.solution_min_length,
        config.solution_max_length,
        config.max_solutions,
        config.constraints.len()
    ));

    // ── Pipeline run ────────────────────────────────────────────────
    section("Pipeline data flow");

    let mut engine = SynthesisEngine::new(domain.clone(), config.clone(), Box::new(DpllSolver::new()))?;
    let pipeline = engine.run()?;
    print_run(&pipeline);

    // ── Shared memory run ───────────────────────────────────────────
    section("Shared-memory data flow (parallel sweep)");

    let mut shared = SynthesisEngine::new(
        domain,
        config.with_shared_memory(true),
        Box::new(DpllSolver::new()),
    )?;
    let general = shared.run_parallel()?;
    print_run(&general);

    // ── Summary ─────────────────────────────────────────────────────
    section("Summary");

    info(&engine.summary().to_string());
    info(&shared.summary().to_string());
    Ok(())
}

// ── Output helpers ──────────────────────────────────────────────────────

fn print_run(run: &SynthesisRun) {
    for entry in &run.rejected {
        warn(&format!("skipped {}", entry));
    }
    for report in &run.lengths {
        print_length(report);
    }
    if run.is_empty() {
        warn("no workflow found");
    }
    for found in &run.solutions {
        print_solution(found);
    }
}

fn print_length(report: &LengthReport) {
    info(&format!(
        "length {}  atoms={}  clauses={}  workflows={}{}",
        report.length,
        report.atoms,
        report.clauses,
        report.solutions,
        if report.exhausted { "  (exhausted)" } else { "" }
    ));
}

fn print_solution(found: &FoundSolution) {
    let workflow = found.solution.workflow();
    ok(&format!("#{}  {}", found.index + 1, workflow));
    for step in &workflow.steps {
        let consumed: Vec<String> = step.consumed.iter().map(|d| join(&d.types)).collect();
        let produced: Vec<String> = step.produced.iter().map(|d| join(&d.types)).collect();
        println!(
            "           {:>2}. {:<12} {} -> {}",
            step.step + 1,
            step.tool.as_str(),
            consumed.join(", "),
            produced.join(", ")
        );
    }
    if let Some(fingerprint) = found.solution.fingerprint() {
        println!("           fingerprint {}", fingerprint);
    }
}

fn join(types: &[flowsat_taxonomy::NodeId]) -> String {
    types
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join("+")
}
