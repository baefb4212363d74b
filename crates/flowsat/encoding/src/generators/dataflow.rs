//! Data flow between steps under the pipeline and shared-memory disciplines.

use crate::{Atom, AtomMapping, Automaton, Clause, State};
use flowsat_taxonomy::{Domain, NodeId};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Which earlier data a step may read
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFlowMode {
    /// Only the outputs of the immediately preceding step (or the workflow
    /// inputs for the first step)
    #[default]
    Pipeline,
    /// Anything produced so far, workflow inputs included
    GeneralMemory,
}

impl DataFlowMode {
    pub fn from_shared_memory(shared_memory: bool) -> Self {
        if shared_memory {
            DataFlowMode::GeneralMemory
        } else {
            DataFlowMode::Pipeline
        }
    }

    /// Block numbers visible from block `block`
    pub fn visible_blocks(&self, block: usize) -> RangeInclusive<usize> {
        match self {
            DataFlowMode::Pipeline => block..=block,
            DataFlowMode::GeneralMemory => 0..=block,
        }
    }
}

/// `¬tool(k) ∨ ⋁ T@u` over the visible used states, per tool input `T`.
///
/// Without workflow inputs a tool that needs data cannot run first.
pub fn tool_inputs(
    domain: &Domain,
    automaton: &Automaton,
    mode: DataFlowMode,
    workflow_has_inputs: bool,
    mapping: &mut AtomMapping,
) -> Vec<Clause> {
    let mut clauses = Vec::new();
    for tool in domain.modules.tools().filter(|t| !t.inputs().is_empty()) {
        for (step, module_state) in automaton.modules.states().iter().enumerate() {
            let tool_atom = mapping.node(&tool.id, module_state);
            if step == 0 && !workflow_has_inputs {
                clauses.push(Clause::new().neg(tool_atom));
                continue;
            }
            let used: Vec<State> = mode
                .visible_blocks(step)
                .filter_map(|b| automaton.types.used_block(b))
                .flat_map(|b| b.states().iter().copied())
                .collect();
            for input in tool.inputs() {
                let candidates: Vec<Atom> = used.iter().map(|u| mapping.node(input, u)).collect();
                clauses.push(Clause::implies_any(tool_atom, candidates));
            }
        }
    }
    clauses
}

/// `¬tool(k) ∨ outᵢ@Mem_{k+1}[i]`, with unused output slots forced empty
pub fn tool_outputs(domain: &Domain, automaton: &Automaton, mapping: &mut AtomMapping) -> Vec<Clause> {
    let empty = domain.types.empty_id();
    let mut clauses = Vec::new();
    for tool in domain.modules.tools() {
        let stride = automaton.branching().stride();
        if tool.outputs().len() > stride {
            tracing::warn!(
                tool = %tool.id,
                outputs = tool.outputs().len(),
                stride,
                "Tool declares more outputs than a block holds; extra outputs ignored"
            );
        }
        for (step, module_state) in automaton.modules.states().iter().enumerate() {
            let Some(block) = automaton.types.memory_block(step + 1) else {
                continue;
            };
            let tool_atom = mapping.node(&tool.id, module_state);
            for (slot, state) in block.states().iter().enumerate() {
                let produced = tool.outputs().get(slot).unwrap_or(empty);
                clauses.push(Clause::new().neg(tool_atom).pos(mapping.node(produced, state)));
            }
        }
    }
    clauses
}

/// Link every used state to the memory state it reads.
///
/// A used state is either empty or references exactly one visible memory
/// state, and then carries the same simple type in every dimension as that
/// memory state.
pub fn memory_references(
    domain: &Domain,
    automaton: &Automaton,
    mode: DataFlowMode,
    mapping: &mut AtomMapping,
) -> Vec<Clause> {
    let empty = domain.types.empty_id();
    let leaves: Vec<&NodeId> = domain.types.simple_types().map(|t| &t.id).collect();
    let mut clauses = Vec::new();

    for block in automaton.types.used_blocks() {
        let sources: Vec<State> = mode
            .visible_blocks(block.number)
            .filter_map(|b| automaton.types.memory_block(b))
            .flat_map(|b| b.states().iter().copied())
            .collect();

        for used in block.states() {
            let empty_atom = mapping.node(empty, used);
            let references: Vec<(State, Atom)> = sources
                .iter()
                .map(|memory| (*memory, mapping.reference(memory, used)))
                .collect();

            let mut reads_something = Clause::new().pos(empty_atom);
            reads_something.extend_pos(references.iter().map(|(_, r)| *r));
            clauses.push(reads_something);

            for (i, (memory, reference)) in references.iter().enumerate() {
                clauses.push(Clause::not_both(*reference, empty_atom));
                for (_, other) in &references[i + 1..] {
                    clauses.push(Clause::not_both(*reference, *other));
                }
                for leaf in &leaves {
                    let here = mapping.node(leaf, used);
                    let there = mapping.node(leaf, memory);
                    clauses.push(Clause::new().neg(*reference).neg(here).pos(there));
                }
            }
        }
    }
    clauses
}
