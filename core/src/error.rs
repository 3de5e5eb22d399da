//! Common error types for Weft.

use crate::{AtomId, TypeId};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Atom not found.
    #[error("Atom not found: {0}")]
    AtomNotFound(AtomId),

    /// Type not found.
    #[error("Type not found: {0}")]
    TypeNotFound(TypeId),

    /// A node was requested with a link type, or vice versa.
    #[error("Kind mismatch: expected a {expected} type, got {type_name}")]
    KindMismatch {
        expected: &'static str,
        type_name: String,
    },

    /// Cannot remove an atom because links reference it.
    #[error("Cannot remove atom {0}: referenced by links")]
    AtomHasIncoming(AtomId),

    /// Invalid operation.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl StoreError {
    pub fn kind_mismatch(expected: &'static str, type_name: impl Into<String>) -> Self {
        Self::KindMismatch {
            expected,
            type_name: type_name.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
