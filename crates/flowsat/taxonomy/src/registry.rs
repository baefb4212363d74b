//! Arena of taxonomy nodes addressed by id.
//!
//! Insertion is idempotent. A leaf definition arriving for an id that is
//! still an abstract placeholder replaces the entry in place; everything
//! else that refers to the node does so through its id, so the upgrade is
//! visible everywhere at once.

use crate::{NodeId, Predicate, TaxonomyError, TaxonomyResult};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Id-keyed node store with deterministic (sorted) iteration
#[derive(Clone, Debug)]
pub struct Registry<N> {
    nodes: BTreeMap<NodeId, N>,
}

impl<N: Predicate> Registry<N> {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }

    /// Insert a node, or return the node already registered under its id.
    ///
    /// A leaf replaces an abstract placeholder without children. A second,
    /// different leaf definition for an existing leaf is rejected and the
    /// first definition stays in place.
    pub fn add(&mut self, node: N) -> TaxonomyResult<&N> {
        match self.nodes.entry(node.id().clone()) {
            Entry::Vacant(slot) => Ok(slot.insert(node)),
            Entry::Occupied(mut slot) => {
                let existing = slot.get();
                if node.is_leaf() && existing.kind().accepts_children() {
                    if !existing.children().is_empty() {
                        return Err(TaxonomyError::ConflictingDefinition(slot.key().clone()));
                    }
                    let placeholder = existing.clone();
                    *slot.get_mut() = placeholder.upgrade(node);
                    tracing::debug!(node = %slot.key(), "Placeholder upgraded to leaf");
                    return Ok(slot.into_mut());
                }
                if node.is_leaf() && existing.is_leaf() && !existing.same_definition(&node) {
                    tracing::warn!(node = %slot.key(), "Conflicting leaf definition ignored");
                    return Err(TaxonomyError::ConflictingDefinition(slot.key().clone()));
                }
                Ok(slot.into_mut())
            }
        }
    }

    /// Record `child` under `parent`. Both must already be registered.
    pub fn add_child(&mut self, parent: &NodeId, child: &NodeId) -> TaxonomyResult<bool> {
        if !self.nodes.contains_key(child) {
            return Err(TaxonomyError::NodeNotFound(child.clone()));
        }
        let node = self
            .nodes
            .get_mut(parent)
            .ok_or_else(|| TaxonomyError::NodeNotFound(parent.clone()))?;
        if !node.kind().accepts_children() || parent == child {
            return Err(TaxonomyError::InvalidChild {
                parent: parent.clone(),
                child: child.clone(),
            });
        }
        Ok(node.insert_child(child.clone()))
    }

    pub fn get(&self, id: &NodeId) -> Option<&N> {
        self.nodes.get(id)
    }

    /// Whether a node with the same id is registered
    pub fn exists(&self, node: &N) -> bool {
        self.nodes.contains_key(node.id())
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes in id order
    pub fn iter(&self) -> impl Iterator<Item = &N> {
        self.nodes.values()
    }

    /// Leaf nodes in id order
    pub fn leaves(&self) -> impl Iterator<Item = &N> {
        self.nodes.values().filter(|n| n.is_leaf())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<N: Predicate> Default for Registry<N> {
    fn default() -> Self {
        Self::new()
    }
}
