//! Decoding solver assignments back into workflows.

use crate::error::DecodeError;
use crate::solver::SolverResponse;
use flowsat_encoding::{Atom, AtomKey, AtomMapping, AtomRole, Clause, Label, State};
use flowsat_taxonomy::{Domain, NodeId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Rendering of an unsatisfiable result
pub const UNSAT: &str = "UNSAT";

// ── Literal ─────────────────────────────────────────────────────────

/// A signed atom together with the fact it stands for
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Literal {
    pub atom: Atom,
    pub negated: bool,
    pub key: AtomKey,
}

impl Literal {
    /// Parse one signed integer token and resolve it through `mapping`
    pub fn parse(token: &str, mapping: &AtomMapping) -> Result<Self, DecodeError> {
        let value: i64 = token
            .parse()
            .map_err(|_| DecodeError::MalformedToken(token.to_string()))?;
        let atom = Atom::try_from(value.unsigned_abs())
            .map_err(|_| DecodeError::MalformedToken(token.to_string()))?;
        let key = mapping
            .resolve(atom)
            .ok_or(DecodeError::UnknownAtom(atom))?
            .clone();
        Ok(Self {
            atom,
            negated: value < 0,
            key,
        })
    }

    pub fn state(&self) -> &State {
        &self.key.state
    }

    pub fn node(&self) -> Option<&NodeId> {
        self.key.node()
    }

    /// The solver integer, sign included
    pub fn signed(&self) -> i64 {
        if self.negated {
            -i64::from(self.atom)
        } else {
            i64::from(self.atom)
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "-")?;
        }
        write!(f, "{}", self.key)
    }
}

fn by_state(a: &Literal, b: &Literal) -> std::cmp::Ordering {
    a.state().cmp(b.state()).then_with(|| a.node().cmp(&b.node()))
}

// ── Solution ────────────────────────────────────────────────────────

/// A satisfying assignment split into the parts a workflow is made of
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Assignment {
    literals: Vec<Literal>,
    /// Positive tool literals in step order
    tools: Vec<Literal>,
    /// Positive simple-type literals in state order
    types: Vec<Literal>,
    /// Positive memory-reference literals in state order
    references: Vec<Literal>,
}

/// Decoded solver result
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Solution {
    Unsat,
    Sat(Assignment),
}

impl Solution {
    /// Decode a raw assignment: whitespace-separated signed integers, `0`
    /// tokens ignored
    pub fn decode(raw: &str, mapping: &AtomMapping, domain: &Domain) -> Result<Self, DecodeError> {
        let mut literals = Vec::new();
        let mut tools = Vec::new();
        let mut types = Vec::new();
        let mut references = Vec::new();

        for token in raw.split_whitespace().filter(|t| *t != "0") {
            let literal = Literal::parse(token, mapping)?;
            if !literal.negated {
                match literal.key.role {
                    AtomRole::Module => {
                        if literal.node().and_then(|id| domain.modules.get(id)).is_some_and(|m| m.is_tool()) {
                            tools.push(literal.clone());
                        }
                    }
                    AtomRole::MemoryType | AtomRole::UsedType => {
                        if literal.node().and_then(|id| domain.types.get(id)).is_some_and(|t| t.is_simple()) {
                            types.push(literal.clone());
                        }
                    }
                    AtomRole::MemoryReference => references.push(literal.clone()),
                }
            }
            literals.push(literal);
        }

        tools.sort_by(by_state);
        types.sort_by(by_state);
        references.sort_by(by_state);
        Ok(Solution::Sat(Assignment {
            literals,
            tools,
            types,
            references,
        }))
    }

    /// Decode a solver response; unsatisfiable maps to [`Solution::Unsat`]
    pub fn from_response(
        response: &SolverResponse,
        mapping: &AtomMapping,
        domain: &Domain,
    ) -> Result<Self, DecodeError> {
        match response {
            SolverResponse::Unsatisfiable => Ok(Solution::Unsat),
            SolverResponse::Satisfiable(raw) => Self::decode(raw, mapping, domain),
        }
    }

    pub fn is_sat(&self) -> bool {
        matches!(self, Solution::Sat(_))
    }

    /// Every literal of the assignment, in solver order
    pub fn literals(&self) -> &[Literal] {
        match self {
            Solution::Sat(a) => &a.literals,
            Solution::Unsat => &[],
        }
    }

    /// Selected tools in step order
    pub fn tools(&self) -> &[Literal] {
        match self {
            Solution::Sat(a) => &a.tools,
            Solution::Unsat => &[],
        }
    }

    /// Simple types present at data states, in state order
    pub fn types(&self) -> &[Literal] {
        match self {
            Solution::Sat(a) => &a.types,
            Solution::Unsat => &[],
        }
    }

    /// Which memory state each non-empty used state reads
    pub fn references(&self) -> &[Literal] {
        match self {
            Solution::Sat(a) => &a.references,
            Solution::Unsat => &[],
        }
    }

    /// Tool ids in step order
    pub fn tool_sequence(&self) -> Vec<&NodeId> {
        self.tools().iter().filter_map(Literal::node).collect()
    }

    /// Every literal in readable form, or `UNSAT`
    pub fn render(&self) -> String {
        match self {
            Solution::Unsat => UNSAT.to_string(),
            Solution::Sat(a) => join(&a.literals),
        }
    }

    /// Tools and simple types in readable form, or `UNSAT`
    pub fn render_relevant(&self) -> String {
        match self {
            Solution::Unsat => UNSAT.to_string(),
            Solution::Sat(a) => {
                let mut relevant: Vec<&Literal> = a.tools.iter().chain(&a.types).collect();
                relevant.sort_by(|x, y| by_state(x, y));
                relevant.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(" ")
            }
        }
    }

    /// The assignment re-encoded as solver integers; empty when unsatisfiable
    pub fn mapped(&self) -> String {
        self.literals()
            .iter()
            .map(|l| l.signed().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Clause forbidding this exact tool selection, absent when unsatisfiable
    pub fn blocking_clause(&self) -> Option<Clause> {
        match self {
            Solution::Unsat => None,
            Solution::Sat(a) => Some(Clause::from_literals(a.tools.iter().map(|l| -i64::from(l.atom)))),
        }
    }

    /// The blocking clause in solver form; empty when unsatisfiable
    pub fn negated_mapped(&self) -> String {
        self.blocking_clause().map(|c| c.to_string()).unwrap_or_default()
    }

    /// BLAKE3 digest of the tool sequence
    pub fn fingerprint(&self) -> Option<SolutionFingerprint> {
        match self {
            Solution::Unsat => None,
            Solution::Sat(a) => {
                let mut hasher = blake3::Hasher::new();
                for tool in &a.tools {
                    hasher.update(format!("{}:{};", tool.state().block(), tool.key.label).as_bytes());
                }
                Some(SolutionFingerprint(*hasher.finalize().as_bytes()))
            }
        }
    }

    /// Steps with the data they consume and produce
    pub fn workflow(&self) -> Workflow {
        let Solution::Sat(a) = self else {
            return Workflow::default();
        };

        let mut items: BTreeMap<State, Vec<NodeId>> = BTreeMap::new();
        for literal in &a.types {
            if let Some(id) = literal.node() {
                items.entry(*literal.state()).or_default().push(id.clone());
            }
        }
        let sources: HashMap<State, State> = a
            .references
            .iter()
            .filter_map(|l| match l.key.label {
                Label::Memory(memory) => Some((l.key.state, memory)),
                Label::Node(_) => None,
            })
            .collect();
        let item = |state: &State, types: &Vec<NodeId>| DataItem {
            state: *state,
            types: types.clone(),
            source: sources.get(state).copied(),
        };

        let length = a.tools.len();
        let mut workflow = Workflow::default();
        for literal in &a.tools {
            if let Some(tool) = literal.node() {
                workflow.steps.push(WorkflowStep {
                    step: literal.state().block(),
                    tool: tool.clone(),
                    consumed: Vec::new(),
                    produced: Vec::new(),
                });
            }
        }
        for (state, types) in &items {
            let block = state.block();
            match state.role() {
                flowsat_encoding::Role::MemoryType if block == 0 => workflow.inputs.push(item(state, types)),
                flowsat_encoding::Role::MemoryType => {
                    if let Some(step) = workflow.steps.iter_mut().find(|s| s.step + 1 == block) {
                        step.produced.push(item(state, types));
                    }
                }
                flowsat_encoding::Role::UsedType if block == length => workflow.outputs.push(item(state, types)),
                flowsat_encoding::Role::UsedType => {
                    if let Some(step) = workflow.steps.iter_mut().find(|s| s.step == block) {
                        step.consumed.push(item(state, types));
                    }
                }
                flowsat_encoding::Role::Module => {}
            }
        }
        workflow
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_relevant())
    }
}

fn join(literals: &[Literal]) -> String {
    literals.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(" ")
}

// ── Workflow view ───────────────────────────────────────────────────

/// One data item: its types and, for used states, the memory state read
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DataItem {
    pub state: State,
    pub types: Vec<NodeId>,
    pub source: Option<State>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorkflowStep {
    pub step: usize,
    pub tool: NodeId,
    pub consumed: Vec<DataItem>,
    pub produced: Vec<DataItem>,
}

/// Tool steps plus the workflow's own inputs and outputs
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Workflow {
    pub inputs: Vec<DataItem>,
    pub steps: Vec<WorkflowStep>,
    pub outputs: Vec<DataItem>,
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tools: Vec<&str> = self.steps.iter().map(|s| s.tool.as_str()).collect();
        write!(f, "{}", tools.join(" -> "))
    }
}

// ── Fingerprint ─────────────────────────────────────────────────────

/// Content digest identifying a tool sequence
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolutionFingerprint(pub [u8; 32]);

impl SolutionFingerprint {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Debug for SolutionFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SolutionFingerprint({})", &self.to_hex()[..12])
    }
}

impl fmt::Display for SolutionFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..12])
    }
}

impl Serialize for SolutionFingerprint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
