//! Pattern error types.

use thiserror::Error;
use weft_core::{AtomId, StoreError};

/// Errors surfaced by the match entry points.
#[derive(Debug, Error)]
pub enum PatternError {
    /// A term has the wrong structural type for its position.
    #[error("Structural error: expected {expected}, got {actual}")]
    Structural { expected: String, actual: String },

    /// A link has the wrong number of children.
    #[error("Structural error: {form} expects {expected} children, got {actual}")]
    WrongArity {
        form: String,
        expected: usize,
        actual: usize,
    },

    /// A declared type name is not registered.
    #[error("Unknown type '{name}'")]
    UnknownType { name: String },

    /// The store rejected an operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The implicator has already run.
    #[error("Implicator is already in use")]
    ImplicatorInUse,
}

impl PatternError {
    pub fn structural(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::Structural {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn wrong_arity(form: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::WrongArity {
            form: form.into(),
            expected,
            actual,
        }
    }

    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    /// Whether this error reports malformed input.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Structural { .. } | Self::WrongArity { .. } | Self::UnknownType { .. }
        )
    }
}

/// Result type for pattern operations.
pub type PatternResult<T> = Result<T, PatternError>;

/// Why one grounding could not be turned into a result.
#[derive(Debug, Error)]
pub enum InstantiateError {
    #[error("Unbound variable {0} in implicand")]
    UnboundVariable(AtomId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Evaluation failed: {message}")]
    Evaluation { message: String },
}

impl InstantiateError {
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation {
            message: message.into(),
        }
    }
}

impl From<SchemaError> for InstantiateError {
    fn from(e: SchemaError) -> Self {
        Self::Evaluation {
            message: e.to_string(),
        }
    }
}

/// Errors raised by grounded schemas.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The arguments are outside the schema's domain.
    #[error("Domain error: {message}")]
    Domain { message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SchemaError {
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain {
            message: message.into(),
        }
    }
}
