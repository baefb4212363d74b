//! Programmatic domain construction.
//!
//! Stands in front of the registries the way an annotation loader would:
//! every call resolves parents and signature types by id before touching
//! the hierarchy, so a failed call leaves the domain unchanged.

use crate::{
    AllModules, AllTypes, DataType, Module, NodeId, Predicate, TaxonomyError, TaxonomyResult,
    ToolSignature,
};

/// Tool and data-type taxonomies of one synthesis domain
#[derive(Clone, Debug)]
pub struct Domain {
    pub modules: AllModules,
    pub types: AllTypes,
}

impl Domain {
    pub fn new<I, D>(tool_root: impl Into<NodeId>, data_root: impl Into<NodeId>, dimensions: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<NodeId>,
    {
        Self {
            modules: AllModules::new(tool_root),
            types: AllTypes::new(data_root, dimensions),
        }
    }

    /// Register an abstract operation under `parent`
    pub fn add_abstract_module(
        &mut self,
        id: impl Into<NodeId>,
        parent: impl Into<NodeId>,
    ) -> TaxonomyResult<()> {
        let id = id.into();
        let parent = parent.into();
        self.require_module_parent(&parent, &id)?;
        let root = self.modules.root().clone();
        self.modules.add(Module::abstract_module(id.clone(), root))?;
        self.modules.add_child(&parent, &id)?;
        Ok(())
    }

    /// Register a tool under one or more abstract operations
    pub fn add_tool(
        &mut self,
        id: impl Into<NodeId>,
        parents: &[&str],
        inputs: &[&str],
        outputs: &[&str],
    ) -> TaxonomyResult<()> {
        let id = id.into();
        let parents: Vec<NodeId> = parents.iter().map(|p| NodeId::new(*p)).collect();
        for parent in &parents {
            self.require_module_parent(parent, &id)?;
        }
        let signature = ToolSignature::new(self.resolve_types(inputs)?, self.resolve_types(outputs)?);

        let root = self.modules.root().clone();
        self.modules.add(Module::tool(id.clone(), root, signature))?;
        for parent in &parents {
            self.modules.add_child(parent, &id)?;
        }
        tracing::debug!(tool = %id, "Tool registered");
        Ok(())
    }

    /// Register an abstract type under `parent`, inheriting its dimension
    pub fn add_abstract_type(
        &mut self,
        id: impl Into<NodeId>,
        parent: impl Into<NodeId>,
    ) -> TaxonomyResult<()> {
        let id = id.into();
        let parent = parent.into();
        let dimension = self.dimension_below(&parent, &id)?;
        self.types.add(DataType::abstract_type(id.clone(), dimension))?;
        self.types.add_child(&parent, &id)?;
        Ok(())
    }

    /// Register a simple type under `parent`, inheriting its dimension
    pub fn add_simple_type(
        &mut self,
        id: impl Into<NodeId>,
        parent: impl Into<NodeId>,
    ) -> TaxonomyResult<()> {
        let id = id.into();
        let parent = parent.into();
        let dimension = self.dimension_below(&parent, &id)?;
        self.types.add(DataType::simple(id.clone(), dimension))?;
        self.types.add_child(&parent, &id)?;
        Ok(())
    }

    fn require_module_parent(&self, parent: &NodeId, child: &NodeId) -> TaxonomyResult<()> {
        let node = self
            .modules
            .get(parent)
            .ok_or_else(|| TaxonomyError::NodeNotFound(parent.clone()))?;
        can_own(node, child)
    }

    fn resolve_types(&self, ids: &[&str]) -> TaxonomyResult<Vec<NodeId>> {
        ids.iter()
            .map(|id| {
                let id = NodeId::new(*id);
                match self.types.get(&id) {
                    Some(_) => Ok(id),
                    None => Err(TaxonomyError::NodeNotFound(id)),
                }
            })
            .collect()
    }

    fn dimension_below(&self, parent: &NodeId, child: &NodeId) -> TaxonomyResult<NodeId> {
        let node = self
            .types
            .get(parent)
            .ok_or_else(|| TaxonomyError::NodeNotFound(parent.clone()))?;
        can_own(node, child)?;
        if self.types.is_dimension(&node.root) {
            Ok(node.root.clone())
        } else {
            Err(TaxonomyError::NoDimension(parent.clone()))
        }
    }
}

fn can_own(parent: &impl Predicate, child: &NodeId) -> TaxonomyResult<()> {
    if parent.kind().accepts_children() && parent.id() != child {
        Ok(())
    } else {
        Err(TaxonomyError::InvalidChild {
            parent: parent.id().clone(),
            child: child.clone(),
        })
    }
}
