//! Data-type taxonomy split into independent dimensions.

use crate::{NodeId, NodeKind, Predicate, Registry, TaxonomyError, TaxonomyResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A node of the data-type taxonomy
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataType {
    pub id: NodeId,
    pub label: String,
    /// Dimension root this type belongs to (the data root for the sentinel)
    pub root: NodeId,
    pub kind: NodeKind,
    children: BTreeSet<NodeId>,
}

impl DataType {
    /// Root of the data taxonomy or of one dimension
    pub fn new_root(id: impl Into<NodeId>) -> Self {
        let id = id.into();
        Self {
            label: id.to_string(),
            root: id.clone(),
            id,
            kind: NodeKind::Root,
            children: BTreeSet::new(),
        }
    }

    pub fn abstract_type(id: impl Into<NodeId>, dimension: impl Into<NodeId>) -> Self {
        let id = id.into();
        Self {
            label: id.to_string(),
            id,
            root: dimension.into(),
            kind: NodeKind::Abstract,
            children: BTreeSet::new(),
        }
    }

    /// A concrete ("simple") type
    pub fn simple(id: impl Into<NodeId>, dimension: impl Into<NodeId>) -> Self {
        let id = id.into();
        Self {
            label: id.to_string(),
            id,
            root: dimension.into(),
            kind: NodeKind::Leaf,
            children: BTreeSet::new(),
        }
    }

    /// The "no data" sentinel
    pub fn empty(data_root: impl Into<NodeId>) -> Self {
        Self {
            id: NodeId::new(crate::EMPTY_TYPE_ID),
            label: "no data".into(),
            root: data_root.into(),
            kind: NodeKind::Empty,
            children: BTreeSet::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn is_simple(&self) -> bool {
        self.kind == NodeKind::Leaf
    }
}

impl Predicate for DataType {
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
        self.kind == other.kind && self.root == other.root
    }

    fn upgrade(self, definition: Self) -> Self {
        Self {
            id: self.id,
            label: definition.label,
            root: definition.root,
            kind: NodeKind::Leaf,
            children: self.children,
        }
    }
}

/// One workflow input or output: the types describing a single data item,
/// at most one per dimension.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSlot {
    pub types: Vec<NodeId>,
}

impl DataSlot {
    pub fn new<I, T>(types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
        }
    }
}

// ── Registry ────────────────────────────────────────────────────────

/// Registry of every data type of one domain
#[derive(Clone, Debug)]
pub struct AllTypes {
    root: NodeId,
    dimensions: Vec<NodeId>,
    empty: NodeId,
    nodes: Registry<DataType>,
}

impl AllTypes {
    /// Registry with the data root, one root per dimension and the "no data"
    /// sentinel placed under every dimension.
    ///
    /// Without explicit dimensions the data root is the only dimension.
    pub fn new<I, D>(root: impl Into<NodeId>, dimensions: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<NodeId>,
    {
        let root = root.into();
        let mut dimensions: Vec<NodeId> = dimensions.into_iter().map(Into::into).collect();
        dimensions.sort();
        dimensions.dedup();
        dimensions.retain(|d| *d != root);

        let mut nodes = Registry::new();
        let _ = nodes.add(DataType::new_root(root.clone()));
        for dimension in &dimensions {
            let _ = nodes.add(DataType::new_root(dimension.clone()));
            let _ = nodes.add_child(&root, dimension);
        }
        if dimensions.is_empty() {
            dimensions.push(root.clone());
        }

        let empty = DataType::empty(root.clone());
        let empty_id = empty.id.clone();
        let _ = nodes.add(empty);
        for dimension in &dimensions {
            let _ = nodes.add_child(dimension, &empty_id);
        }

        Self {
            root,
            dimensions,
            empty: empty_id,
            nodes,
        }
    }

    pub fn root(&self) -> &NodeId {
        &self.root
    }

    /// Dimension roots in id order
    pub fn dimensions(&self) -> &[NodeId] {
        &self.dimensions
    }

    pub fn is_dimension(&self, id: &NodeId) -> bool {
        self.dimensions.contains(id)
    }

    pub fn empty_id(&self) -> &NodeId {
        &self.empty
    }

    /// Insert or upgrade a type. Non-root types must sit in a declared dimension.
    pub fn add(&mut self, data_type: DataType) -> TaxonomyResult<&DataType> {
        if data_type.kind != NodeKind::Root && !self.is_dimension(&data_type.root) {
            return Err(TaxonomyError::NoDimension(data_type.id));
        }
        self.nodes.add(data_type)
    }

    pub fn add_child(&mut self, parent: &NodeId, child: &NodeId) -> TaxonomyResult<bool> {
        self.nodes.add_child(parent, child)
    }

    pub fn get(&self, id: &NodeId) -> Option<&DataType> {
        self.nodes.get(id)
    }

    pub fn exists(&self, data_type: &DataType) -> bool {
        self.nodes.exists(data_type)
    }

    /// Dimension a type is classified under
    pub fn dimension_of(&self, id: &NodeId) -> Option<&NodeId> {
        self.get(id)
            .map(|t| &t.root)
            .filter(|root| self.is_dimension(root))
    }

    /// Concrete types in id order
    pub fn simple_types(&self) -> impl Iterator<Item = &DataType> {
        self.nodes.leaves()
    }

    /// Simple types of one dimension followed by the sentinel
    pub fn types_in_dimension(&self, dimension: &NodeId) -> Vec<&DataType> {
        self.nodes
            .leaves()
            .filter(|t| &t.root == dimension)
            .chain(self.nodes.get(&self.empty))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataType> {
        self.nodes.iter()
    }

    pub fn registry(&self) -> &Registry<DataType> {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
