//! Run configuration.

use crate::error::ConfigError;
use flowsat_encoding::{Branching, ConstraintSpec, DataFlowMode, EncodingOptions};
use flowsat_taxonomy::{DataSlot, NodeId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a synthesis run needs besides the domain itself
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Root of the tool taxonomy
    pub tool_taxonomy_root: NodeId,
    /// Root of the data-type taxonomy
    pub data_taxonomy_root: NodeId,
    /// Dimension roots below the data root; empty means a single dimension
    pub data_dimensions: Vec<NodeId>,
    /// Let steps read anything produced earlier, not only the previous step
    pub shared_memory: bool,
    pub solution_min_length: usize,
    pub solution_max_length: usize,
    /// Stop after this many workflows across all lengths
    pub max_solutions: usize,
    pub max_tool_inputs: usize,
    pub max_tool_outputs: usize,
    /// Workflow inputs, one entry per data item
    pub inputs: Vec<DataSlot>,
    /// Required workflow outputs, one entry per data item
    pub outputs: Vec<DataSlot>,
    pub constraints: Vec<ConstraintSpec>,
    /// Log every encoding and raw assignment at debug level
    pub debug_mode: bool,
    /// Maximum tracked run records (bounded FIFO)
    pub max_tracked_records: usize,
    /// Worker threads for parallel sweeps; 0 uses the available parallelism
    pub max_workers: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            tool_taxonomy_root: NodeId::new("tools"),
            data_taxonomy_root: NodeId::new("data"),
            data_dimensions: Vec::new(),
            shared_memory: false,
            solution_min_length: 1,
            solution_max_length: 10,
            max_solutions: 5,
            max_tool_inputs: 3,
            max_tool_outputs: 3,
            inputs: Vec::new(),
            outputs: Vec::new(),
            constraints: Vec::new(),
            debug_mode: false,
            max_tracked_records: 256,
            max_workers: 0,
        }
    }
}

impl SynthesisConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_roots(mut self, tools: impl Into<NodeId>, data: impl Into<NodeId>) -> Self {
        self.tool_taxonomy_root = tools.into();
        self.data_taxonomy_root = data.into();
        self
    }

    pub fn with_dimensions<I, D>(mut self, dimensions: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<NodeId>,
    {
        self.data_dimensions = dimensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_lengths(mut self, min: usize, max: usize) -> Self {
        self.solution_min_length = min;
        self.solution_max_length = max;
        self
    }

    pub fn with_max_solutions(mut self, max_solutions: usize) -> Self {
        self.max_solutions = max_solutions;
        self
    }

    pub fn with_shared_memory(mut self, shared_memory: bool) -> Self {
        self.shared_memory = shared_memory;
        self
    }

    pub fn with_branching(mut self, max_inputs: usize, max_outputs: usize) -> Self {
        self.max_tool_inputs = max_inputs;
        self.max_tool_outputs = max_outputs;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_input(mut self, slot: DataSlot) -> Self {
        self.inputs.push(slot);
        self
    }

    pub fn with_output(mut self, slot: DataSlot) -> Self {
        self.outputs.push(slot);
        self
    }

    pub fn with_constraint(mut self, constraint: ConstraintSpec) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn branching(&self) -> Branching {
        Branching::new(self.max_tool_inputs, self.max_tool_outputs)
    }

    pub fn mode(&self) -> DataFlowMode {
        DataFlowMode::from_shared_memory(self.shared_memory)
    }

    /// Length-independent encoder options
    pub fn encoding_options(&self) -> EncodingOptions {
        EncodingOptions {
            mode: self.mode(),
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            constraints: self.constraints.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.solution_min_length < 1 {
            return Err(invalid("solution_min_length", "must be at least 1".into()));
        }
        if self.solution_max_length < self.solution_min_length {
            return Err(invalid(
                "solution_max_length",
                format!(
                    "{} is below solution_min_length {}",
                    self.solution_max_length, self.solution_min_length
                ),
            ));
        }
        if self.max_tool_inputs < 1 {
            return Err(invalid("max_tool_inputs", "must be at least 1".into()));
        }
        if self.max_tool_outputs < 1 {
            return Err(invalid("max_tool_outputs", "must be at least 1".into()));
        }
        let stride = self.branching().stride();
        if self.inputs.len() > stride {
            return Err(invalid(
                "inputs",
                format!("{} inputs do not fit a block of {}", self.inputs.len(), stride),
            ));
        }
        if self.outputs.len() > stride {
            return Err(invalid(
                "outputs",
                format!("{} outputs do not fit a block of {}", self.outputs.len(), stride),
            ));
        }
        if self.max_tracked_records < 1 {
            return Err(invalid("max_tracked_records", "must be at least 1".into()));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidValue { field, reason }
}
