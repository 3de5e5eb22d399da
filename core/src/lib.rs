//! Weft Core Types
//!
//! This crate provides the foundational types used throughout Weft:
//! - Identity types (AtomId, TypeId)
//! - Truth values (strength/confidence pairs)
//! - Atom structures (Node, Link)
//! - Common error types

mod atom;
mod error;
mod id;
mod truth;

pub use atom::*;
pub use error::*;
pub use id::*;
pub use truth::*;
