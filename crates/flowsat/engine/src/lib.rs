//! Workflow synthesis engine.
//!
//! Drives the encoding crate over a range of candidate lengths, hands each
//! clause set to a [`SatSolver`], decodes the assignments into
//! [`Solution`]s and keeps enumerating with blocking clauses until the
//! configured number of workflows is found.
//!
//! ```text
//! SynthesisConfig ──► Encoder (per length) ──► SatSolver ──► Solution
//!                          ▲                                     │
//!                          └──────── blocking clause ◄───────────┘
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;
pub mod solution;
pub mod solver;
pub mod types;

pub use config::SynthesisConfig;
pub use engine::{LengthOutcome, SynthesisEngine};
pub use error::{
    ConfigError, DecodeError, EngineError, EngineResult, SolverError, SolverResult,
};
pub use solution::{
    Assignment, DataItem, Literal, Solution, SolutionFingerprint, Workflow, WorkflowStep, UNSAT,
};
pub use solver::{parse_solver_output, DpllSolver, ExternalSolver, SatSolver, SolverResponse};
pub use types::{
    FoundSolution, LengthReport, RunId, RunStatus, SynthesisRecord, SynthesisRun,
    SynthesisSummary,
};
