//! Structural clause generators.
//!
//! Each generator reads the domain and automaton, allocates the atoms it
//! needs in the shared mapping and returns its clauses; the encoder decides
//! the order in which they are appended.

pub mod dataflow;
pub mod exclusion;
pub mod io;
pub mod mandatory;
pub mod taxonomy;

pub use dataflow::{memory_references, tool_inputs, tool_outputs, DataFlowMode};
pub use exclusion::{tool_exclusion, type_exclusion};
pub use io::{has_workflow_inputs, workflow_inputs, workflow_outputs};
pub use mandatory::mandatory_usage;
pub use taxonomy::taxonomy_closure;
