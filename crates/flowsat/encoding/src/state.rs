//! Automaton states and their absolute ordering.
//!
//! With stride `β` (the larger of the tool input and output arity) every
//! workflow step occupies `2β + 1` consecutive order numbers: `β` memory
//! slots, `β` used slots and one module slot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a state describes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Tool applied at a step
    Module,
    /// Data item available in memory
    MemoryType,
    /// Data item consumed by a step (or returned by the workflow)
    UsedType,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Module => write!(f, "module"),
            Role::MemoryType => write!(f, "memory"),
            Role::UsedType => write!(f, "used"),
        }
    }
}

/// Maximum number of tool inputs and outputs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branching {
    pub max_inputs: usize,
    pub max_outputs: usize,
}

impl Branching {
    pub fn new(max_inputs: usize, max_outputs: usize) -> Self {
        Self {
            max_inputs,
            max_outputs,
        }
    }

    /// Slots per memory or used block
    pub fn stride(&self) -> usize {
        self.max_inputs.max(self.max_outputs)
    }

    /// Order numbers taken by one workflow step
    pub fn step_width(&self) -> usize {
        2 * self.stride() + 1
    }
}

impl Default for Branching {
    fn default() -> Self {
        Self::new(3, 3)
    }
}

/// One position of the automaton
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    role: Role,
    block: usize,
    index: usize,
    absolute: usize,
}

impl State {
    /// Module state of 0-based step `step`
    pub fn module(step: usize, branching: Branching) -> Self {
        Self {
            role: Role::Module,
            block: step,
            index: 0,
            absolute: (step + 1) * branching.step_width() - 1,
        }
    }

    /// Slot `index` of memory block `block`
    pub fn memory(block: usize, index: usize, branching: Branching) -> Self {
        Self {
            role: Role::MemoryType,
            block,
            index,
            absolute: block * branching.step_width() + index,
        }
    }

    /// Slot `index` of used block `block`
    pub fn used(block: usize, index: usize, branching: Branching) -> Self {
        Self {
            role: Role::UsedType,
            block,
            index,
            absolute: block * branching.step_width() + branching.stride() + index,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Block number; for module states this is the step
    pub fn block(&self) -> usize {
        self.block
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Position in the total order over all states
    pub fn absolute(&self) -> usize {
        self.absolute
    }

    pub fn is_type_state(&self) -> bool {
        self.role != Role::Module
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.absolute
            .cmp(&other.absolute)
            .then(self.role.cmp(&other.role))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            Role::Module => write!(f, "M{}", self.block),
            Role::MemoryType => write!(f, "Tm{}.{}", self.block, self.index),
            Role::UsedType => write!(f, "Tu{}.{}", self.block, self.index),
        }
    }
}
