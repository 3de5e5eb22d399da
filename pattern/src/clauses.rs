//! Clause classification.

use crate::{AtomStore, PatternError, PatternResult};
use tracing::debug;
use weft_core::AtomId;

/// A conjunctive pattern split into affirmed and negated clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseSet {
    pub affirmed: Vec<AtomId>,
    pub negated: Vec<AtomId>,
}

/// Split a clause holder.
///
/// An `AndLink` contributes each child as an affirmed clause, except that a
/// `NotLink` child contributes its single child as a negated clause. Any other
/// holder is the sole affirmed clause.
pub fn classify(store: &dyn AtomStore, holder: AtomId) -> PatternResult<ClauseSet> {
    let core = *store.core();
    let mut clauses = ClauseSet::default();

    if store.type_of(holder)? != core.and_link {
        clauses.affirmed.push(holder);
        return Ok(clauses);
    }

    for &child in store.outgoing_set(holder)? {
        if store.type_of(child)? == core.not_link {
            let inner = store.outgoing_set(child)?;
            if inner.len() != 1 {
                return Err(PatternError::wrong_arity("NotLink", 1, inner.len()));
            }
            clauses.negated.push(inner[0]);
        } else {
            clauses.affirmed.push(child);
        }
    }

    debug!(
        affirmed = clauses.affirmed.len(),
        negated = clauses.negated.len(),
        "classified clauses"
    );
    Ok(clauses)
}
