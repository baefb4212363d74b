//! Propositional encoding of workflow synthesis.
//!
//! For a candidate length the [`Automaton`] lays out one module state per
//! step plus blocks of memory and used data states around them. Generators
//! turn the taxonomies, the tool signatures and the user constraints into
//! clauses over atoms allocated in an [`AtomMapping`]; the resulting [`Cnf`]
//! is what a SAT solver sees.

#![deny(unsafe_code)]

pub mod atoms;
pub mod automaton;
pub mod cnf;
pub mod constraints;
pub mod encoder;
pub mod errors;
pub mod generators;
pub mod state;

pub use atoms::{Atom, AtomKey, AtomMapping, AtomRole, Label};
pub use automaton::{Automaton, Block, ModuleAutomaton, TypeAutomaton};
pub use cnf::{Clause, Cnf};
pub use constraints::{ConstraintSpec, ConstraintTemplate};
pub use encoder::{Encoder, Encoding, EncodingOptions};
pub use errors::{ConstraintError, EncodingError, EncodingResult, RejectedEntry};
pub use generators::DataFlowMode;
pub use state::{Branching, Role, State};
