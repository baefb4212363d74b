#[path = "property/taxonomy_closure.rs"]
mod taxonomy_closure;

#[path = "property/mutual_exclusion.rs"]
mod mutual_exclusion;

#[path = "property/atom_mapping.rs"]
mod atom_mapping;

#[path = "property/blocking_enumeration.rs"]
mod blocking_enumeration;
