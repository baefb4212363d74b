//! Run identifiers, records and reports.

use crate::solution::Solution;
use chrono::{DateTime, Utc};
use flowsat_encoding::RejectedEntry;
use serde::{Deserialize, Serialize};

/// Unique identifier of a synthesis run
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub String);

impl RunId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "run:{}", self.0)
    }
}

// ── Status ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Running,
    Completed,
    Failed(String),
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Running => write!(f, "running"),
            RunStatus::Completed => write!(f, "completed"),
            RunStatus::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

// ── Results ─────────────────────────────────────────────────────────

/// Statistics for one candidate length
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthReport {
    pub length: usize,
    pub atoms: usize,
    pub clauses: usize,
    pub solutions: usize,
    /// The solver proved there are no further workflows of this length
    pub exhausted: bool,
}

/// A workflow found during a run
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FoundSolution {
    pub length: usize,
    /// Position among all solutions of the run
    pub index: usize,
    pub solution: Solution,
}

/// Everything a run produced
#[derive(Clone, Debug)]
pub struct SynthesisRun {
    pub id: RunId,
    pub solutions: Vec<FoundSolution>,
    pub lengths: Vec<LengthReport>,
    /// Constraints and I/O slots skipped while encoding
    pub rejected: Vec<RejectedEntry>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SynthesisRun {
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Tool sequences in discovery order
    pub fn tool_sequences(&self) -> Vec<Vec<String>> {
        self.solutions
            .iter()
            .map(|s| {
                s.solution
                    .tool_sequence()
                    .iter()
                    .map(|t| t.to_string())
                    .collect()
            })
            .collect()
    }
}

// ── Records ─────────────────────────────────────────────────────────

/// History entry kept by the engine for each run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SynthesisRecord {
    pub id: RunId,
    pub status: RunStatus,
    pub solutions_found: usize,
    pub lengths_explored: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_ms: Option<i64>,
}

impl SynthesisRecord {
    pub fn new() -> Self {
        Self {
            id: RunId::new(),
            status: RunStatus::Running,
            solutions_found: 0,
            lengths_explored: 0,
            started_at: Utc::now(),
            completed_at: None,
            duration_ms: None,
        }
    }

    pub fn mark_completed(&mut self, solutions_found: usize, lengths_explored: usize) {
        self.status = RunStatus::Completed;
        self.solutions_found = solutions_found;
        self.lengths_explored = lengths_explored;
        self.finish();
    }

    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status = RunStatus::Failed(reason.into());
        self.finish();
    }

    fn finish(&mut self) {
        let completed = Utc::now();
        self.duration_ms = Some((completed - self.started_at).num_milliseconds());
        self.completed_at = Some(completed);
    }
}

impl Default for SynthesisRecord {
    fn default() -> Self {
        Self::new()
    }
}

// ── Summary ─────────────────────────────────────────────────────────

/// Summary statistics over the tracked records
#[derive(Clone, Debug, Default)]
pub struct SynthesisSummary {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub total_solutions: usize,
}

impl std::fmt::Display for SynthesisSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SynthesisSummary(total={}, completed={}, failed={}, solutions={})",
            self.total, self.completed, self.failed, self.total_solutions,
        )
    }
}
