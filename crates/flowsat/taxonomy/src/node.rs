//! Taxonomy node model shared by the tool and data-type hierarchies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a taxonomy node. Unique within one registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Position of a node inside its taxonomy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Root of a (sub-)taxonomy
    Root,
    /// Intermediate classification with children
    Abstract,
    /// Concrete tool or simple type
    Leaf,
    /// "No data" / "no operation" sentinel
    Empty,
}

impl NodeKind {
    /// Whether a node of this kind may own children.
    pub fn accepts_children(&self) -> bool {
        matches!(self, NodeKind::Root | NodeKind::Abstract)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Root => write!(f, "root"),
            NodeKind::Abstract => write!(f, "abstract"),
            NodeKind::Leaf => write!(f, "leaf"),
            NodeKind::Empty => write!(f, "empty"),
        }
    }
}

/// Behaviour common to tool and type nodes.
///
/// Registries never hand out long-lived references across an upgrade;
/// callers always resolve nodes through their [`NodeId`].
pub trait Predicate: Clone + fmt::Debug {
    fn id(&self) -> &NodeId;

    /// Root of the (sub-)taxonomy this node belongs to.
    fn root(&self) -> &NodeId;

    fn kind(&self) -> NodeKind;

    /// Child ids, empty for leaves and the sentinel.
    fn children(&self) -> &BTreeSet<NodeId>;

    /// Record a child. Returns `false` when the child was already present.
    fn insert_child(&mut self, child: NodeId) -> bool;

    /// Whether two leaf definitions for the same id describe the same node.
    fn same_definition(&self, other: &Self) -> bool;

    /// Complete a placeholder with a leaf definition arriving under its id.
    fn upgrade(self, definition: Self) -> Self;

    fn is_leaf(&self) -> bool {
        self.kind() == NodeKind::Leaf
    }

    fn is_empty_sentinel(&self) -> bool {
        self.kind() == NodeKind::Empty
    }
}
