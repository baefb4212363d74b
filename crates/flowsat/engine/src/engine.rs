//! Synthesis engine: sweeps candidate lengths and enumerates workflows.
//!
//! For every length from the configured minimum to the maximum:
//! 1. Encode the domain, I/O and constraints for that length
//! 2. Solve; decode the assignment into a solution
//! 3. Append the solution's blocking clause and solve again
//! 4. Stop the length on UNSAT, stop the run when the quota is reached

use std::collections::{HashSet, VecDeque};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use flowsat_encoding::{Branching, Encoder, EncodingOptions, RejectedEntry};
use flowsat_taxonomy::Domain;

use crate::config::SynthesisConfig;
use crate::error::{ConfigError, EngineError, EngineResult};
use crate::solution::Solution;
use crate::solver::SatSolver;
use crate::types::{
    FoundSolution, LengthReport, RunId, RunStatus, SynthesisRecord, SynthesisRun, SynthesisSummary,
};

/// Solutions and statistics for one candidate length
#[derive(Clone, Debug)]
pub struct LengthOutcome {
    pub report: LengthReport,
    pub solutions: Vec<Solution>,
    pub rejected: Vec<RejectedEntry>,
}

/// The workflow synthesis engine.
pub struct SynthesisEngine {
    domain: Domain,
    config: SynthesisConfig,
    solver: Box<dyn SatSolver>,
    /// Bounded FIFO queue of run records.
    records: VecDeque<SynthesisRecord>,
}

impl SynthesisEngine {
    /// Create an engine after checking the configuration against the domain.
    pub fn new(
        domain: Domain,
        config: SynthesisConfig,
        solver: Box<dyn SatSolver>,
    ) -> EngineResult<Self> {
        config.validate()?;
        if domain.modules.root() != &config.tool_taxonomy_root {
            return Err(mismatch("tool_taxonomy_root", &config.tool_taxonomy_root, domain.modules.root()));
        }
        if domain.types.root() != &config.data_taxonomy_root {
            return Err(mismatch("data_taxonomy_root", &config.data_taxonomy_root, domain.types.root()));
        }
        if let Some(unknown) = config
            .data_dimensions
            .iter()
            .find(|d| !domain.types.is_dimension(d))
        {
            return Err(ConfigError::InvalidValue {
                field: "data_dimensions",
                reason: format!("'{}' is not a dimension of the domain", unknown),
            }
            .into());
        }

        tracing::info!(
            solver = solver.name(),
            tools = domain.modules.tools().count(),
            types = domain.types.simple_types().count(),
            "Synthesis engine ready"
        );
        Ok(Self {
            domain,
            config,
            solver,
            records: VecDeque::new(),
        })
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Sweep lengths in order until the solution quota is met.
    pub fn run(&mut self) -> EngineResult<SynthesisRun> {
        let mut record = SynthesisRecord::new();
        let result = self.sweep(record.id.clone(), record.started_at);
        self.finish(&mut record, &result);
        result
    }

    /// Enumerate lengths on a bounded pool of scoped threads, then merge in
    /// length order. Produces the same solutions as [`Self::run`].
    ///
    /// Workers take lengths in ascending order and stop once the lengths
    /// below them have already filled the quota.
    pub fn run_parallel(&mut self) -> EngineResult<SynthesisRun> {
        let mut record = SynthesisRecord::new();
        let result = self.sweep_parallel(record.id.clone(), record.started_at);
        self.finish(&mut record, &result);
        result
    }

    /// Enumerate up to `quota` workflows of exactly `length` steps.
    pub fn enumerate(&self, length: usize, quota: usize) -> EngineResult<LengthOutcome> {
        let options = self.config.encoding_options();
        enumerate_length(
            &self.domain,
            self.solver.as_ref(),
            &options,
            self.config.branching(),
            self.config.debug_mode,
            length,
            || quota,
        )
    }

    /// Find a run record by ID.
    pub fn find(&self, id: &RunId) -> Option<&SynthesisRecord> {
        self.records.iter().find(|r| r.id == *id)
    }

    /// All tracked run records.
    pub fn all_records(&self) -> &VecDeque<SynthesisRecord> {
        &self.records
    }

    /// Summary statistics.
    pub fn summary(&self) -> SynthesisSummary {
        let mut summary = SynthesisSummary {
            total: self.records.len(),
            ..SynthesisSummary::default()
        };
        for record in &self.records {
            match &record.status {
                RunStatus::Completed => {
                    summary.completed += 1;
                    summary.total_solutions += record.solutions_found;
                }
                RunStatus::Failed(_) => summary.failed += 1,
                RunStatus::Running => {}
            }
        }
        summary
    }

    fn sweep(
        &self,
        id: RunId,
        started_at: chrono::DateTime<chrono::Utc>,
    ) -> EngineResult<SynthesisRun> {
        let options = self.config.encoding_options();
        let mut run = empty_run(id, started_at);

        for length in self.config.solution_min_length..=self.config.solution_max_length {
            let remaining = self.config.max_solutions - run.solutions.len();
            if remaining == 0 {
                break;
            }
            let outcome = enumerate_length(
                &self.domain,
                self.solver.as_ref(),
                &options,
                self.config.branching(),
                self.config.debug_mode,
                length,
                || remaining,
            )?;
            absorb(&mut run, outcome, remaining);
        }

        run.finished_at = chrono::Utc::now();
        Ok(run)
    }

    fn sweep_parallel(
        &self,
        id: RunId,
        started_at: chrono::DateTime<chrono::Utc>,
    ) -> EngineResult<SynthesisRun> {
        let options = self.config.encoding_options();
        let quota = self.config.max_solutions;
        let mut run = empty_run(id, started_at);
        if quota == 0 {
            run.finished_at = chrono::Utc::now();
            return Ok(run);
        }

        let lengths: Vec<usize> =
            (self.config.solution_min_length..=self.config.solution_max_length).collect();
        let workers = self.worker_count(lengths.len());
        let progress = SweepProgress::new(quota, lengths.len());
        let cursor = AtomicUsize::new(0);

        let domain = &self.domain;
        let solver = self.solver.as_ref();
        let branching = self.config.branching();
        let debug = self.config.debug_mode;
        let (options, lengths, progress, cursor) = (&options, &lengths, &progress, &cursor);

        tracing::debug!(workers, lengths = lengths.len(), "Starting parallel sweep");
        let mut outcomes: Vec<Option<EngineResult<LengthOutcome>>> =
            std::iter::repeat_with(|| None).take(lengths.len()).collect();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    scope.spawn(move || {
                        let mut done = Vec::new();
                        loop {
                            let offset = cursor.fetch_add(1, Ordering::Relaxed);
                            let Some(&length) = lengths.get(offset) else {
                                break;
                            };
                            if progress.needed(offset) == 0 {
                                break;
                            }
                            let outcome = enumerate_length(
                                domain,
                                solver,
                                options,
                                branching,
                                debug,
                                length,
                                || progress.needed(offset),
                            );
                            progress.record(offset, outcome.as_ref().map_or(0, |o| o.solutions.len()));
                            done.push((offset, outcome));
                        }
                        done
                    })
                })
                .collect();
            for handle in handles {
                // A panicked worker leaves its lengths unfilled; the merge reports them.
                if let Ok(done) = handle.join() {
                    for (offset, outcome) in done {
                        outcomes[offset] = Some(outcome);
                    }
                }
            }
        });

        for (length, outcome) in lengths.iter().zip(outcomes) {
            let remaining = quota - run.solutions.len();
            if remaining == 0 {
                break;
            }
            let outcome = outcome.unwrap_or_else(|| Err(EngineError::WorkerPanicked(*length)))?;
            absorb(&mut run, outcome, remaining);
        }

        run.finished_at = chrono::Utc::now();
        Ok(run)
    }

    fn worker_count(&self, lengths: usize) -> usize {
        let limit = match self.config.max_workers {
            0 => std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            n => n,
        };
        limit.min(lengths).max(1)
    }

    fn finish(&mut self, record: &mut SynthesisRecord, result: &EngineResult<SynthesisRun>) {
        match result {
            Ok(run) => {
                record.mark_completed(run.solutions.len(), run.lengths.len());
                tracing::info!(
                    run_id = %record.id,
                    solutions = run.solutions.len(),
                    lengths = run.lengths.len(),
                    "Synthesis run completed"
                );
            }
            Err(e) => {
                record.mark_failed(e.to_string());
                tracing::warn!(run_id = %record.id, error = %e, "Synthesis run failed");
            }
        }
        self.store_record(record.clone());
    }

    /// Store record with FIFO eviction.
    fn store_record(&mut self, record: SynthesisRecord) {
        if self.records.len() >= self.config.max_tracked_records {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }
}

/// Solution counts of finished lengths, shared by parallel workers.
struct SweepProgress {
    quota: usize,
    found: Vec<OnceLock<usize>>,
}

impl SweepProgress {
    fn new(quota: usize, lengths: usize) -> Self {
        Self {
            quota,
            found: (0..lengths).map(|_| OnceLock::new()).collect(),
        }
    }

    /// Upper bound on the solutions the length at `offset` can still
    /// contribute, given the shorter lengths that have finished.
    fn needed(&self, offset: usize) -> usize {
        let known: usize = self.found[..offset].iter().filter_map(OnceLock::get).sum();
        self.quota.saturating_sub(known)
    }

    fn record(&self, offset: usize, solutions: usize) {
        let _ = self.found[offset].set(solutions);
    }
}

/// Encode one length and enumerate with blocking clauses while fewer than
/// `budget()` solutions have been found.
fn enumerate_length(
    domain: &Domain,
    solver: &dyn SatSolver,
    options: &EncodingOptions,
    branching: Branching,
    debug: bool,
    length: usize,
    budget: impl Fn() -> usize,
) -> EngineResult<LengthOutcome> {
    let mut encoding = Encoder::new(domain, options).encode(length, branching)?;
    let atoms = encoding.atom_count();
    let clauses = encoding.clause_count();
    if debug {
        tracing::debug!(length, cnf = %encoding.cnf.render(), "Encoded problem");
    }

    let mut solutions = Vec::new();
    let mut seen = HashSet::new();
    let mut exhausted = false;
    while solutions.len() < budget() {
        let response = solver.solve(&encoding.cnf, encoding.atom_count())?;
        let solution = Solution::from_response(&response, &encoding.mapping, domain)?;
        let Some(blocking) = solution.blocking_clause() else {
            exhausted = true;
            break;
        };
        if debug {
            tracing::debug!(length, assignment = %solution.mapped(), "Raw assignment");
        }
        if let Some(fingerprint) = solution.fingerprint() {
            if !seen.insert(fingerprint) {
                tracing::warn!(length, %fingerprint, "Solver returned a blocked workflow again");
            }
        }
        encoding.cnf.push(blocking);
        solutions.push(solution);
    }

    tracing::info!(
        length,
        atoms,
        clauses,
        solutions = solutions.len(),
        exhausted,
        "Length explored"
    );
    Ok(LengthOutcome {
        report: LengthReport {
            length,
            atoms,
            clauses,
            solutions: solutions.len(),
            exhausted,
        },
        solutions,
        rejected: encoding.rejected,
    })
}

fn empty_run(id: RunId, started_at: chrono::DateTime<chrono::Utc>) -> SynthesisRun {
    SynthesisRun {
        id,
        solutions: Vec::new(),
        lengths: Vec::new(),
        rejected: Vec::new(),
        started_at,
        finished_at: started_at,
    }
}

/// Merge one length into the run, keeping at most `remaining` solutions.
fn absorb(run: &mut SynthesisRun, outcome: LengthOutcome, remaining: usize) {
    let LengthOutcome {
        mut report,
        solutions,
        rejected,
    } = outcome;
    if run.lengths.is_empty() {
        run.rejected = rejected;
    }
    // Filling the quota ends the length without proving it exhausted.
    if solutions.len() >= remaining {
        report.solutions = remaining;
        report.exhausted = false;
    }
    for solution in solutions.into_iter().take(remaining) {
        run.solutions.push(FoundSolution {
            length: report.length,
            index: run.solutions.len(),
            solution,
        });
    }
    run.lengths.push(report);
}

fn mismatch(
    field: &'static str,
    configured: &flowsat_taxonomy::NodeId,
    actual: &flowsat_taxonomy::NodeId,
) -> EngineError {
    ConfigError::InvalidValue {
        field,
        reason: format!("configured '{}' but the domain uses '{}'", configured, actual),
    }
    .into()
}
