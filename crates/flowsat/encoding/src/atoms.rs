//! Mapping between symbolic facts and solver variables.
//!
//! Every fact the encoding talks about ("tool X at step 2", "type png in
//! used slot 1.0", "used slot 1.0 reads memory slot 0.1") gets a dense
//! positive integer the first time it is mentioned. One mapping belongs to
//! exactly one automaton; it grows while clauses are generated and is only
//! read afterwards, when solver assignments are decoded.

use crate::{Role, State};
use flowsat_taxonomy::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Solver variable, numbered from 1
pub type Atom = u32;

/// What an atom is about
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// A tool or data-type taxonomy node
    Node(NodeId),
    /// A memory state read by a used state
    Memory(State),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Node(id) => write!(f, "{}", id),
            Label::Memory(state) => write!(f, "ref({})", state),
        }
    }
}

/// Role of an atom: the state role, or a memory reference
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AtomRole {
    Module,
    MemoryType,
    UsedType,
    MemoryReference,
}

impl AtomRole {
    fn of(label: &Label, state: &State) -> Self {
        match (label, state.role()) {
            (Label::Memory(_), _) => AtomRole::MemoryReference,
            (Label::Node(_), Role::Module) => AtomRole::Module,
            (Label::Node(_), Role::MemoryType) => AtomRole::MemoryType,
            (Label::Node(_), Role::UsedType) => AtomRole::UsedType,
        }
    }
}

/// The (predicate, state, role) triple an atom stands for
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtomKey {
    pub label: Label,
    pub state: State,
    pub role: AtomRole,
}

impl AtomKey {
    pub fn new(label: Label, state: State) -> Self {
        let role = AtomRole::of(&label, &state);
        Self { label, state, role }
    }

    /// Taxonomy node id, if the atom is about a node
    pub fn node(&self) -> Option<&NodeId> {
        match &self.label {
            Label::Node(id) => Some(id),
            Label::Memory(_) => None,
        }
    }
}

impl fmt::Display for AtomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.label, self.state)
    }
}

/// Bijective, append-only table of atoms for one automaton
#[derive(Clone, Debug, Default)]
pub struct AtomMapping {
    atoms: HashMap<AtomKey, Atom>,
    /// `keys[atom - 1]` is the key of `atom`
    keys: Vec<AtomKey>,
}

impl AtomMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atom for `key`, allocated on first use
    pub fn add(&mut self, key: AtomKey) -> Atom {
        if let Some(atom) = self.atoms.get(&key) {
            return *atom;
        }
        let atom = self.keys.len() as Atom + 1;
        self.keys.push(key.clone());
        self.atoms.insert(key, atom);
        atom
    }

    /// Atom for "`node` holds at `state`"
    pub fn node(&mut self, node: &NodeId, state: &State) -> Atom {
        self.add(AtomKey::new(Label::Node(node.clone()), *state))
    }

    /// Atom for "used state `used` reads memory state `memory`"
    pub fn reference(&mut self, memory: &State, used: &State) -> Atom {
        self.add(AtomKey::new(Label::Memory(*memory), *used))
    }

    /// Lookup without allocation
    pub fn get(&self, key: &AtomKey) -> Option<Atom> {
        self.atoms.get(key).copied()
    }

    pub fn get_node(&self, node: &NodeId, state: &State) -> Option<Atom> {
        self.get(&AtomKey::new(Label::Node(node.clone()), *state))
    }

    /// Reverse lookup
    pub fn resolve(&self, atom: Atom) -> Option<&AtomKey> {
        let index = (atom as usize).checked_sub(1)?;
        self.keys.get(index)
    }

    /// Number of allocated atoms, which is also the largest atom
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Atoms with their keys in allocation order
    pub fn iter(&self) -> impl Iterator<Item = (Atom, &AtomKey)> {
        self.keys
            .iter()
            .enumerate()
            .map(|(i, key)| (i as Atom + 1, key))
    }
}
