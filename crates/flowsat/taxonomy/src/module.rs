//! Tool taxonomy: abstract operations down to concrete tools.

use crate::{NodeId, NodeKind, Predicate, Registry, TaxonomyResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Input and output type ids of a tool, in slot order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSignature {
    pub inputs: Vec<NodeId>,
    pub outputs: Vec<NodeId>,
}

impl ToolSignature {
    pub fn new(inputs: Vec<NodeId>, outputs: Vec<NodeId>) -> Self {
        Self { inputs, outputs }
    }
}

/// A node of the tool taxonomy
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: NodeId,
    /// Human-readable name
    pub label: String,
    pub root: NodeId,
    pub kind: NodeKind,
    children: BTreeSet<NodeId>,
    /// Present only on tools
    signature: Option<ToolSignature>,
}

impl Module {
    /// Root of the tool taxonomy
    pub fn new_root(id: impl Into<NodeId>) -> Self {
        let id = id.into();
        Self {
            label: id.to_string(),
            root: id.clone(),
            id,
            kind: NodeKind::Root,
            children: BTreeSet::new(),
            signature: None,
        }
    }

    /// Abstract operation (also used as a placeholder for not-yet-annotated tools)
    pub fn abstract_module(id: impl Into<NodeId>, root: impl Into<NodeId>) -> Self {
        let id = id.into();
        Self {
            label: id.to_string(),
            id,
            root: root.into(),
            kind: NodeKind::Abstract,
            children: BTreeSet::new(),
            signature: None,
        }
    }

    /// Concrete tool with its annotated signature
    pub fn tool(
        id: impl Into<NodeId>,
        root: impl Into<NodeId>,
        signature: ToolSignature,
    ) -> Self {
        let id = id.into();
        Self {
            label: id.to_string(),
            id,
            root: root.into(),
            kind: NodeKind::Leaf,
            children: BTreeSet::new(),
            signature: Some(signature),
        }
    }

    /// The "no operation" sentinel
    pub fn empty(root: impl Into<NodeId>) -> Self {
        Self {
            id: NodeId::new(crate::EMPTY_MODULE_ID),
            label: "no operation".into(),
            root: root.into(),
            kind: NodeKind::Empty,
            children: BTreeSet::new(),
            signature: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn signature(&self) -> Option<&ToolSignature> {
        self.signature.as_ref()
    }

    /// Input type ids (empty for non-tools)
    pub fn inputs(&self) -> &[NodeId] {
        self.signature.as_ref().map(|s| s.inputs.as_slice()).unwrap_or(&[])
    }

    /// Output type ids (empty for non-tools)
    pub fn outputs(&self) -> &[NodeId] {
        self.signature.as_ref().map(|s| s.outputs.as_slice()).unwrap_or(&[])
    }

    pub fn is_tool(&self) -> bool {
        self.kind == NodeKind::Leaf
    }
}

impl Predicate for Module {
    fn id(&self) -> &NodeId {
        &self.id
    }

    fn root(&self) -> &NodeId {
        &self.root
    }

    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn children(&self) -> &BTreeSet<NodeId> {
        &self.children
    }

    fn insert_child(&mut self, child: NodeId) -> bool {
        self.children.insert(child)
    }

    fn same_definition(&self, other: &Self) -> bool {
        self.kind == other.kind && self.root == other.root && self.signature == other.signature
    }

    fn upgrade(self, definition: Self) -> Self {
        Self {
            id: self.id,
            label: definition.label,
            root: definition.root,
            kind: NodeKind::Leaf,
            children: self.children,
            signature: definition.signature,
        }
    }
}

// ── Registry ────────────────────────────────────────────────────────

/// Registry of every module of one domain
#[derive(Clone, Debug)]
pub struct AllModules {
    root: NodeId,
    nodes: Registry<Module>,
}

impl AllModules {
    /// Registry holding the taxonomy root and the "no operation" sentinel
    pub fn new(root: impl Into<NodeId>) -> Self {
        let root = root.into();
        let mut nodes = Registry::new();
        let _ = nodes.add(Module::new_root(root.clone()));
        let _ = nodes.add(Module::empty(root.clone()));
        Self { root, nodes }
    }

    pub fn root(&self) -> &NodeId {
        &self.root
    }

    /// Insert or upgrade a module; see [`Registry::add`]
    pub fn add(&mut self, module: Module) -> TaxonomyResult<&Module> {
        self.nodes.add(module)
    }

    pub fn add_child(&mut self, parent: &NodeId, child: &NodeId) -> TaxonomyResult<bool> {
        self.nodes.add_child(parent, child)
    }

    pub fn get(&self, id: &NodeId) -> Option<&Module> {
        self.nodes.get(id)
    }

    pub fn exists(&self, module: &Module) -> bool {
        self.nodes.exists(module)
    }

    pub fn empty(&self) -> Option<&Module> {
        self.nodes.get(&NodeId::new(crate::EMPTY_MODULE_ID))
    }

    /// Concrete tools in id order
    pub fn tools(&self) -> impl Iterator<Item = &Module> {
        self.nodes.leaves()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.nodes.iter()
    }

    pub fn registry(&self) -> &Registry<Module> {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
