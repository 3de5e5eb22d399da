//! Weft Rule
//!
//! Forward chaining over bind rules.
//!
//! Responsibilities:
//! - Hold named bind rules with priorities
//! - Fire rules round after round to quiescence
//! - Enforce round and result limits

mod chainer;
mod error;

pub use chainer::{BindRule, ChainerConfig, ChainerStats, ForwardChainer, RuleMode};
pub use error::{RuleError, RuleResult};

/// Maximum chaining rounds.
pub const MAX_ROUNDS: usize = 100;

/// Maximum results per run.
pub const MAX_RESULTS: usize = 10_000;
