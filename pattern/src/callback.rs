//! The grounding callback protocol.
//!
//! The search engine consults the acceptance hooks while it builds a
//! candidate, then hands each complete candidate to [`PatternMatchCallback::grounding`].

use crate::{find_variables, AtomStore, Grounding, TypeRestrictions};
use weft_core::AtomId;

/// Hooks between the search engine and the logic consuming its results.
pub trait PatternMatchCallback {
    /// Receive the type restrictions of the declared variables.
    fn set_type_restrictions(&mut self, _restrictions: TypeRestrictions) {}

    fn type_restrictions(&self) -> Option<&TypeRestrictions> {
        None
    }

    /// A constant pattern node against a candidate ground.
    ///
    /// Candidates are enumerated from the constant nodes of a clause, so an
    /// override may only narrow identity: accepting a node other than
    /// `pattern` never yields extra candidates.
    fn node_match(&mut self, _store: &dyn AtomStore, pattern: AtomId, ground: AtomId) -> bool {
        pattern == ground
    }

    /// A free variable against a candidate ground.
    fn variable_match(&mut self, store: &dyn AtomStore, variable: AtomId, ground: AtomId) -> bool {
        default_variable_match(store, self.type_restrictions(), variable, ground)
    }

    /// A pattern link against a candidate ground, before its children.
    fn link_match(&mut self, store: &dyn AtomStore, pattern: AtomId, ground: AtomId) -> bool {
        default_link_match(store, pattern, ground)
    }

    /// A fully matched affirmed clause.
    fn clause_match(&mut self, _store: &dyn AtomStore, _clause: AtomId, _ground: AtomId) -> bool {
        true
    }

    /// Whether a negated clause is satisfied by `ground`, or by having none.
    fn optional_clause_match(
        &mut self,
        _store: &dyn AtomStore,
        _clause: AtomId,
        ground: Option<AtomId>,
    ) -> bool {
        ground.is_none()
    }

    /// A complete grounding. Returning `true` stops the search.
    fn grounding(&mut self, store: &mut dyn AtomStore, grounding: &Grounding) -> bool;
}

/// Reject grounds that hold a variable anywhere in their tree or fall
/// outside the variable's allowed types.
///
/// Patterns share the store with facts, so a stored pattern term is never
/// a ground.
pub fn default_variable_match(
    store: &dyn AtomStore,
    restrictions: Option<&TypeRestrictions>,
    variable: AtomId,
    ground: AtomId,
) -> bool {
    let Ok(ground_type) = store.type_of(ground) else {
        return false;
    };
    if !find_variables(store, ground).map_or(false, |found| found.is_empty()) {
        return false;
    }
    restrictions.map_or(true, |r| r.permits(store, variable, ground_type))
}

/// Links match when they share type and arity.
pub fn default_link_match(store: &dyn AtomStore, pattern: AtomId, ground: AtomId) -> bool {
    match (store.atom(pattern), store.atom(ground)) {
        (Some(p), Some(g)) => {
            g.is_link() && p.type_id() == g.type_id() && p.outgoing().len() == g.outgoing().len()
        }
        _ => false,
    }
}

/// Collects every grounding the engine reports.
#[derive(Debug, Default)]
pub struct GroundingCollector {
    restrictions: TypeRestrictions,
    groundings: Vec<Grounding>,
}

impl GroundingCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groundings(&self) -> &[Grounding] {
        &self.groundings
    }

    pub fn into_groundings(self) -> Vec<Grounding> {
        self.groundings
    }
}

impl PatternMatchCallback for GroundingCollector {
    fn set_type_restrictions(&mut self, restrictions: TypeRestrictions) {
        self.restrictions = restrictions;
    }

    fn type_restrictions(&self) -> Option<&TypeRestrictions> {
        Some(&self.restrictions)
    }

    fn grounding(&mut self, _store: &mut dyn AtomStore, grounding: &Grounding) -> bool {
        self.groundings.push(grounding.clone());
        false
    }
}
