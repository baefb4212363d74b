//! Assembles the full CNF for one candidate workflow length.

use crate::constraints::ConstraintSpec;
use crate::generators::{self, DataFlowMode};
use crate::{AtomMapping, Automaton, Branching, Clause, Cnf, EncodingResult, RejectedEntry};
use flowsat_taxonomy::{DataSlot, Domain};
use serde::{Deserialize, Serialize};

/// Per-run encoding inputs that do not depend on the length
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingOptions {
    pub mode: DataFlowMode,
    pub inputs: Vec<DataSlot>,
    pub outputs: Vec<DataSlot>,
    pub constraints: Vec<ConstraintSpec>,
}

impl EncodingOptions {
    pub fn new(mode: DataFlowMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_input(mut self, slot: DataSlot) -> Self {
        self.inputs.push(slot);
        self
    }

    pub fn with_output(mut self, slot: DataSlot) -> Self {
        self.outputs.push(slot);
        self
    }

    pub fn with_constraint(mut self, constraint: ConstraintSpec) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// The encoded problem for one automaton.
///
/// The mapping and the clause set belong together: blocking clauses added
/// during enumeration must use this mapping.
#[derive(Clone, Debug)]
pub struct Encoding {
    pub automaton: Automaton,
    pub mapping: AtomMapping,
    pub cnf: Cnf,
    /// Constraints and I/O slots that were skipped
    pub rejected: Vec<RejectedEntry>,
}

impl Encoding {
    pub fn atom_count(&self) -> usize {
        self.mapping.len()
    }

    pub fn clause_count(&self) -> usize {
        self.cnf.len()
    }

    pub fn to_dimacs(&self) -> String {
        self.cnf.to_dimacs(self.mapping.len())
    }
}

/// Builds encodings of one domain under fixed options
pub struct Encoder<'a> {
    domain: &'a Domain,
    options: &'a EncodingOptions,
}

impl<'a> Encoder<'a> {
    pub fn new(domain: &'a Domain, options: &'a EncodingOptions) -> Self {
        Self { domain, options }
    }

    /// Encode every structural rule, the workflow I/O and the user
    /// constraints for workflows of exactly `length` steps
    pub fn encode(&self, length: usize, branching: Branching) -> EncodingResult<Encoding> {
        let domain = self.domain;
        let options = self.options;
        let automaton = Automaton::build(length, branching)?;
        let module_states = automaton.modules.states().to_vec();
        let type_states = automaton.types.all_states();

        let mut mapping = AtomMapping::new();
        let mut cnf = Cnf::new();
        let mut rejected = Vec::new();

        append(
            &mut cnf,
            "mandatory usage",
            generators::mandatory_usage(domain, &automaton, &mut mapping),
        );
        append(
            &mut cnf,
            "tool taxonomy",
            generators::taxonomy_closure(
                domain.modules.registry(),
                domain.modules.root(),
                &module_states,
                &mut mapping,
            )?,
        );
        for dimension in domain.types.dimensions() {
            append(
                &mut cnf,
                "type taxonomy",
                generators::taxonomy_closure(domain.types.registry(), dimension, &type_states, &mut mapping)?,
            );
        }
        append(
            &mut cnf,
            "tool exclusion",
            generators::tool_exclusion(domain, &automaton, &mut mapping),
        );
        append(
            &mut cnf,
            "type exclusion",
            generators::type_exclusion(domain, &automaton, &mut mapping),
        );
        append(
            &mut cnf,
            "tool inputs",
            generators::tool_inputs(
                domain,
                &automaton,
                options.mode,
                generators::has_workflow_inputs(&options.inputs, domain, &automaton),
                &mut mapping,
            ),
        );
        append(
            &mut cnf,
            "tool outputs",
            generators::tool_outputs(domain, &automaton, &mut mapping),
        );
        append(
            &mut cnf,
            "memory references",
            generators::memory_references(domain, &automaton, options.mode, &mut mapping),
        );
        append(
            &mut cnf,
            "workflow inputs",
            generators::workflow_inputs(&options.inputs, domain, &automaton, &mut mapping, &mut rejected),
        );
        append(
            &mut cnf,
            "workflow outputs",
            generators::workflow_outputs(&options.outputs, domain, &automaton, &mut mapping, &mut rejected),
        );

        for constraint in &options.constraints {
            match constraint.compile(domain, &automaton, &mut mapping) {
                Ok(clauses) => append(&mut cnf, "constraint", clauses),
                Err(error) => {
                    tracing::warn!(constraint = %constraint, error = %error, "Constraint skipped");
                    rejected.push(RejectedEntry::new(constraint.to_string(), error));
                }
            }
        }

        tracing::info!(
            length,
            atoms = mapping.len(),
            clauses = cnf.len(),
            rejected = rejected.len(),
            "Encoding complete"
        );
        Ok(Encoding {
            automaton,
            mapping,
            cnf,
            rejected,
        })
    }
}

fn append(cnf: &mut Cnf, section: &str, clauses: Vec<Clause>) {
    tracing::debug!(section, clauses = clauses.len(), "Clauses generated");
    cnf.extend(clauses);
}
