//! Module and type automata for one candidate workflow length.

use crate::{Branching, EncodingError, EncodingResult, Role, State};
use serde::{Deserialize, Serialize};

/// Fixed-size run of same-role states belonging to one step
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub number: usize,
    pub role: Role,
    states: Vec<State>,
}

impl Block {
    fn memory(number: usize, branching: Branching) -> Self {
        Self {
            number,
            role: Role::MemoryType,
            states: (0..branching.stride())
                .map(|i| State::memory(number, i, branching))
                .collect(),
        }
    }

    fn used(number: usize, branching: Branching) -> Self {
        Self {
            number,
            role: Role::UsedType,
            states: (0..branching.stride())
                .map(|i| State::used(number, i, branching))
                .collect(),
        }
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// One module state per workflow step
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleAutomaton {
    states: Vec<State>,
}

impl ModuleAutomaton {
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, step: usize) -> Option<&State> {
        self.states.get(step)
    }

    pub fn first(&self) -> Option<&State> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&State> {
        self.states.last()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Memory and used blocks around the module steps.
///
/// `Mem₀` carries the workflow inputs and `Mem_{k+1}` the outputs of step
/// `k`; `Used_k` is read by step `k` and the trailing `Used_L` is the
/// workflow output block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAutomaton {
    memory: Vec<Block>,
    used: Vec<Block>,
}

impl TypeAutomaton {
    pub fn memory_blocks(&self) -> &[Block] {
        &self.memory
    }

    pub fn used_blocks(&self) -> &[Block] {
        &self.used
    }

    pub fn memory_block(&self, number: usize) -> Option<&Block> {
        self.memory.get(number)
    }

    pub fn used_block(&self, number: usize) -> Option<&Block> {
        self.used.get(number)
    }

    /// Workflow input block
    pub fn input_block(&self) -> Option<&Block> {
        self.memory.first()
    }

    /// Workflow output block
    pub fn output_block(&self) -> Option<&Block> {
        self.used.last()
    }

    pub fn memory_states(&self) -> impl Iterator<Item = &State> {
        self.memory.iter().flat_map(|b| b.states.iter())
    }

    pub fn used_states(&self) -> impl Iterator<Item = &State> {
        self.used.iter().flat_map(|b| b.states.iter())
    }

    /// Every type state in absolute order
    pub fn all_states(&self) -> Vec<State> {
        let mut states: Vec<State> = self.memory_states().chain(self.used_states()).copied().collect();
        states.sort();
        states
    }
}

/// Complete state model for one candidate length
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Automaton {
    length: usize,
    branching: Branching,
    pub modules: ModuleAutomaton,
    pub types: TypeAutomaton,
}

impl Automaton {
    /// Build the automata for a workflow of `length` steps
    pub fn build(length: usize, branching: Branching) -> EncodingResult<Self> {
        if length == 0 {
            return Err(EncodingError::InvalidLength(length));
        }
        if branching.stride() == 0 {
            return Err(EncodingError::InvalidBranching(branching.max_inputs, branching.max_outputs));
        }

        let modules = ModuleAutomaton {
            states: (0..length).map(|k| State::module(k, branching)).collect(),
        };
        let types = TypeAutomaton {
            memory: (0..=length).map(|b| Block::memory(b, branching)).collect(),
            used: (0..=length).map(|b| Block::used(b, branching)).collect(),
        };

        tracing::debug!(length, stride = branching.stride(), "Automaton built");
        Ok(Self {
            length,
            branching,
            modules,
            types,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn branching(&self) -> Branching {
        self.branching
    }

    /// Total number of states across both automata
    pub fn state_count(&self) -> usize {
        self.modules.len() + 2 * (self.length + 1) * self.branching.stride()
    }
}
