//! Weft Pattern
//!
//! Find groundings of typed, partly negated patterns in an atom store and
//! instantiate templates from them.
//!
//! Responsibilities:
//! - Resolve variable declarations and type restrictions
//! - Classify clauses into affirmed and negated
//! - Search the store for groundings (backtracking engine)
//! - Mediate between search and consumers (callback protocol)
//! - Instantiate implicands, including grounded schemas
//! - Package results for the bind and imply entry points

mod binding;
mod callback;
mod clauses;
mod driver;
mod engine;
mod error;
mod implicator;
mod instantiate;
mod store;
mod variables;

#[cfg(test)]
mod test_support;

pub use binding::Grounding;
pub use callback::{
    default_link_match, default_variable_match, GroundingCollector, PatternMatchCallback,
};
pub use clauses::{classify, ClauseSet};
pub use driver::PatternMatch;
pub use engine::PatternMatchEngine;
pub use error::{InstantiateError, PatternError, PatternResult, SchemaError};
pub use implicator::{AcceptancePolicy, Implicator, ImplicatorState, StopHook};
pub use instantiate::{Instantiator, SchemaFn, SchemaRegistry};
pub use store::AtomStore;
pub use variables::{
    find_variables, is_variable, resolve_declarations, TypeRestrictions, VariableDeclarations,
    VariableSet,
};
