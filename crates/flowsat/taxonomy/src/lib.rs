//! Taxonomies for flowsat workflow synthesis.
//!
//! Two hierarchies describe a synthesis domain: the tool taxonomy, from
//! abstract operations down to concrete tools with typed signatures, and the
//! data-type taxonomy, split into independent dimensions (for example format
//! and content). Both are stored in id-addressed registries with sorted
//! iteration, so every encoding built on top of them numbers its atoms the
//! same way across runs.

#![deny(unsafe_code)]

pub mod data_type;
pub mod domain;
pub mod errors;
pub mod module;
pub mod node;
pub mod registry;

pub use data_type::{AllTypes, DataSlot, DataType};
pub use domain::Domain;
pub use errors::{TaxonomyError, TaxonomyResult};
pub use module::{AllModules, Module, ToolSignature};
pub use node::{NodeId, NodeKind, Predicate};
pub use registry::Registry;

/// Id of the "no data" type present in every type registry
pub const EMPTY_TYPE_ID: &str = "empty";

/// Id of the "no operation" module present in every module registry
pub const EMPTY_MODULE_ID: &str = "empty_module";
