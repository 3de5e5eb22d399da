//! Weft Registry
//!
//! Runtime type lookup. Single source of truth for atom type names, their
//! node/link kind, and the subtype hierarchy.
//! The registry is immutable after construction via RegistryBuilder.

mod builder;
mod registry;
mod types;

pub use builder::{RegistryBuilder, RegistryError, TypeBuilder};
pub use registry::Registry;
pub use types::*;
