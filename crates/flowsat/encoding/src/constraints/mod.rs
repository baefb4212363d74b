//! Catalogue of user constraint templates.
//!
//! A constraint names a template and its parameters. Compilation checks the
//! arity, resolves every parameter against the right taxonomy and only then
//! allocates atoms, so a rejected constraint leaves no trace in the
//! encoding.

pub mod sltl;

use crate::{Atom, AtomMapping, Automaton, Clause, ConstraintError};
use flowsat_taxonomy::{Domain, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Parameter {
    Module,
    Type,
}

/// Available constraint patterns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstraintTemplate {
    UseType,
    IfThenModule,
    LastModule,
    FirstModule,
    UseModule,
    NotUseModule,
    NotUseType,
    GenerateType,
    NextModule,
}

impl ConstraintTemplate {
    pub const ALL: [ConstraintTemplate; 9] = [
        ConstraintTemplate::UseType,
        ConstraintTemplate::IfThenModule,
        ConstraintTemplate::LastModule,
        ConstraintTemplate::FirstModule,
        ConstraintTemplate::UseModule,
        ConstraintTemplate::NotUseModule,
        ConstraintTemplate::NotUseType,
        ConstraintTemplate::GenerateType,
        ConstraintTemplate::NextModule,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ConstraintTemplate::UseType => "use-type",
            ConstraintTemplate::IfThenModule => "if-then-module",
            ConstraintTemplate::LastModule => "last-module",
            ConstraintTemplate::FirstModule => "first-module",
            ConstraintTemplate::UseModule => "use-module",
            ConstraintTemplate::NotUseModule => "not-use-module",
            ConstraintTemplate::NotUseType => "not-use-type",
            ConstraintTemplate::GenerateType => "generate-type",
            ConstraintTemplate::NextModule => "next-module",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConstraintTemplate::UseType => "Use type ${0} in the workflow.",
            ConstraintTemplate::IfThenModule => {
                "If we use module ${0}, then use ${1} subsequently."
            }
            ConstraintTemplate::LastModule => "Use ${0} as the last module in the solution.",
            ConstraintTemplate::FirstModule => "Use ${0} as the first module in the solution.",
            ConstraintTemplate::UseModule => "Use module ${0} in the solution.",
            ConstraintTemplate::NotUseModule => "Do not use module ${0} in the solution.",
            ConstraintTemplate::NotUseType => "Do not use type ${0} in the workflow.",
            ConstraintTemplate::GenerateType => "Generate type ${0} by some module.",
            ConstraintTemplate::NextModule => {
                "If we use module ${0}, then use ${1} as the next module."
            }
        }
    }

    fn parameters(&self) -> &'static [Parameter] {
        match self {
            ConstraintTemplate::UseType
            | ConstraintTemplate::NotUseType
            | ConstraintTemplate::GenerateType => &[Parameter::Type],
            ConstraintTemplate::LastModule
            | ConstraintTemplate::FirstModule
            | ConstraintTemplate::UseModule
            | ConstraintTemplate::NotUseModule => &[Parameter::Module],
            ConstraintTemplate::IfThenModule | ConstraintTemplate::NextModule => {
                &[Parameter::Module, Parameter::Module]
            }
        }
    }

    pub fn arity(&self) -> usize {
        self.parameters().len()
    }

    /// Check arity and resolve parameters, then emit the clauses
    pub fn compile(
        &self,
        parameters: &[NodeId],
        domain: &Domain,
        automaton: &Automaton,
        mapping: &mut AtomMapping,
    ) -> Result<Vec<Clause>, ConstraintError> {
        if parameters.len() != self.arity() {
            return Err(ConstraintError::ArityMismatch {
                template: self.id().to_string(),
                expected: self.arity(),
                found: parameters.len(),
            });
        }
        for (id, kind) in parameters.iter().zip(self.parameters()) {
            match kind {
                Parameter::Module if domain.modules.get(id).is_none() => {
                    return Err(ConstraintError::UnknownModule(id.clone()))
                }
                Parameter::Type if domain.types.get(id).is_none() => {
                    return Err(ConstraintError::UnknownType(id.clone()))
                }
                _ => {}
            }
        }

        let clauses = match self {
            ConstraintTemplate::UseType => sltl::eventually(&type_trace(&parameters[0], automaton, mapping)),
            ConstraintTemplate::NotUseType => sltl::never(&type_trace(&parameters[0], automaton, mapping)),
            ConstraintTemplate::GenerateType => {
                sltl::eventually(&generated_trace(&parameters[0], automaton, mapping))
            }
            ConstraintTemplate::UseModule => sltl::eventually(&module_trace(&parameters[0], automaton, mapping)),
            ConstraintTemplate::NotUseModule => sltl::never(&module_trace(&parameters[0], automaton, mapping)),
            ConstraintTemplate::FirstModule => sltl::at(&module_trace(&parameters[0], automaton, mapping), 0),
            ConstraintTemplate::LastModule => {
                let trace = module_trace(&parameters[0], automaton, mapping);
                sltl::at(&trace, trace.len().saturating_sub(1))
            }
            ConstraintTemplate::IfThenModule => {
                let premise = module_trace(&parameters[0], automaton, mapping);
                let consequence = module_trace(&parameters[1], automaton, mapping);
                sltl::followed_by(&premise, &consequence)
            }
            ConstraintTemplate::NextModule => {
                let premise = module_trace(&parameters[0], automaton, mapping);
                let consequence = module_trace(&parameters[1], automaton, mapping);
                sltl::next(&premise, &consequence)
            }
        };
        Ok(clauses)
    }
}

impl fmt::Display for ConstraintTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

fn module_trace(id: &NodeId, automaton: &Automaton, mapping: &mut AtomMapping) -> Vec<Atom> {
    automaton
        .modules
        .states()
        .iter()
        .map(|s| mapping.node(id, s))
        .collect()
}

fn type_trace(id: &NodeId, automaton: &Automaton, mapping: &mut AtomMapping) -> Vec<Atom> {
    automaton
        .types
        .all_states()
        .iter()
        .map(|s| mapping.node(id, s))
        .collect()
}

/// Memory states written by tools (every memory block but the inputs)
fn generated_trace(id: &NodeId, automaton: &Automaton, mapping: &mut AtomMapping) -> Vec<Atom> {
    automaton
        .types
        .memory_blocks()
        .iter()
        .skip(1)
        .flat_map(|b| b.states())
        .map(|s| mapping.node(id, s))
        .collect()
}

/// A template id plus its parameters, as supplied by the user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSpec {
    pub template: String,
    #[serde(default)]
    pub parameters: Vec<NodeId>,
}

impl ConstraintSpec {
    pub fn new<I, P>(template: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<NodeId>,
    {
        Self {
            template: template.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }

    /// Look up the template and compile against one automaton
    pub fn compile(
        &self,
        domain: &Domain,
        automaton: &Automaton,
        mapping: &mut AtomMapping,
    ) -> Result<Vec<Clause>, ConstraintError> {
        let template = ConstraintTemplate::from_id(&self.template)
            .ok_or_else(|| ConstraintError::UnknownTemplate(self.template.clone()))?;
        template.compile(&self.parameters, domain, automaton, mapping)
    }
}

impl fmt::Display for ConstraintSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parameters: Vec<&str> = self.parameters.iter().map(|p| p.as_str()).collect();
        write!(f, "{}({})", self.template, parameters.join(", "))
    }
}
