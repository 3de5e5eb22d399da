//! Backtracking search over the store.
//!
//! Affirmed clauses are solved left to right. Each clause is matched against
//! candidate roots found from an anchor (a constant node or an already bound
//! variable) by walking incoming sets up to the anchor's depth; a clause with
//! no anchor scans every atom of its type. Candidate lists are snapshots, so
//! atoms created by `grounding` never become candidates of the same search.
//! Anchoring on constant nodes means a `node_match` hook can only narrow.

use crate::{AtomStore, Grounding, PatternMatchCallback, PatternResult, VariableSet};
use std::collections::{BTreeSet, VecDeque};
use tracing::{debug, trace};
use weft_core::AtomId;

/// Finds every grounding of one classified pattern.
#[derive(Debug, Clone, Copy)]
pub struct PatternMatchEngine<'p> {
    variables: &'p VariableSet,
    affirmed: &'p [AtomId],
    negated: &'p [AtomId],
}

impl<'p> PatternMatchEngine<'p> {
    pub fn new(variables: &'p VariableSet, affirmed: &'p [AtomId], negated: &'p [AtomId]) -> Self {
        Self {
            variables,
            affirmed,
            negated,
        }
    }

    /// Run the search. Returns `true` if the callback stopped it early.
    pub fn run(
        &self,
        store: &mut dyn AtomStore,
        callback: &mut dyn PatternMatchCallback,
    ) -> PatternResult<bool> {
        debug!(
            variables = self.variables.len(),
            affirmed = self.affirmed.len(),
            negated = self.negated.len(),
            "pattern search started"
        );
        let stopped = self.solve(store, callback, 0, Grounding::new())?;
        debug!(stopped, "pattern search finished");
        Ok(stopped)
    }

    fn solve(
        &self,
        store: &mut dyn AtomStore,
        callback: &mut dyn PatternMatchCallback,
        index: usize,
        grounding: Grounding,
    ) -> PatternResult<bool> {
        let Some(&clause) = self.affirmed.get(index) else {
            return self.complete(store, callback, grounding);
        };

        let candidates = self.candidates(&*store, clause, &grounding)?;
        for candidate in candidates {
            let matched = self.match_term(&*store, callback, clause, candidate, grounding.clone())?;
            let Some(mut extended) = matched else {
                continue;
            };
            if !callback.clause_match(&*store, clause, candidate) {
                trace!(%clause, %candidate, "clause rejected by callback");
                continue;
            }
            trace!(%clause, %candidate, "clause matched");
            extended.ground_clause(clause, candidate);
            if self.solve(store, callback, index + 1, extended)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// All affirmed clauses matched: check bindings and negated clauses,
    /// then report the grounding.
    fn complete(
        &self,
        store: &mut dyn AtomStore,
        callback: &mut dyn PatternMatchCallback,
        grounding: Grounding,
    ) -> PatternResult<bool> {
        if let Some(unbound) = self.variables.iter().find(|v| !grounding.is_bound(*v)) {
            trace!(variable = %unbound, "variable left unbound");
            return Ok(false);
        }

        for &clause in self.negated {
            let view: &dyn AtomStore = &*store;
            let grounds = self.clause_grounds(view, callback, clause, &grounding)?;
            let satisfied = if grounds.is_empty() {
                callback.optional_clause_match(view, clause, None)
            } else {
                grounds
                    .iter()
                    .all(|&g| callback.optional_clause_match(view, clause, Some(g)))
            };
            if !satisfied {
                trace!(%clause, "negated clause present");
                return Ok(false);
            }
        }

        Ok(callback.grounding(store, &grounding))
    }

    /// Grounds of a clause under fixed bindings.
    fn clause_grounds(
        &self,
        store: &dyn AtomStore,
        callback: &mut dyn PatternMatchCallback,
        clause: AtomId,
        grounding: &Grounding,
    ) -> PatternResult<Vec<AtomId>> {
        let mut grounds = Vec::new();
        for candidate in self.candidates(store, clause, grounding)? {
            if self
                .match_term(store, callback, clause, candidate, grounding.clone())?
                .is_some()
            {
                grounds.push(candidate);
            }
        }
        Ok(grounds)
    }

    /// Ordered structural match of `pattern` against `ground`.
    fn match_term(
        &self,
        store: &dyn AtomStore,
        callback: &mut dyn PatternMatchCallback,
        pattern: AtomId,
        ground: AtomId,
        mut grounding: Grounding,
    ) -> PatternResult<Option<Grounding>> {
        if self.variables.contains(pattern) {
            return Ok(match grounding.get(pattern) {
                Some(bound) => (bound == ground).then_some(grounding),
                None if callback.variable_match(store, pattern, ground) => {
                    grounding.bind(pattern, ground);
                    Some(grounding)
                }
                None => None,
            });
        }

        if store.is_node(pattern) {
            return Ok(callback.node_match(store, pattern, ground).then_some(grounding));
        }

        if !callback.link_match(store, pattern, ground) {
            return Ok(None);
        }
        let pattern_children = store.outgoing_set(pattern)?;
        let ground_children = store.outgoing_set(ground)?;
        if pattern_children.len() != ground_children.len() {
            return Ok(None);
        }

        for (&p, &g) in pattern_children.iter().zip(ground_children) {
            match self.match_term(store, callback, p, g, grounding)? {
                Some(next) => grounding = next,
                None => return Ok(None),
            }
        }
        Ok(Some(grounding))
    }

    /// Candidate roots for a clause, in creation order.
    fn candidates(
        &self,
        store: &dyn AtomStore,
        clause: AtomId,
        grounding: &Grounding,
    ) -> PatternResult<Vec<AtomId>> {
        if self.variables.contains(clause) {
            return Ok(grounding.get(clause).into_iter().collect());
        }
        if store.is_node(clause) {
            return Ok(vec![clause]);
        }

        let clause_type = store.type_of(clause)?;
        let Some((anchor, depth)) = self.find_anchor(store, clause, grounding)? else {
            return Ok(store.atoms_of_type(clause_type));
        };

        let mut frontier = BTreeSet::from([anchor]);
        for _ in 0..depth {
            frontier = frontier
                .iter()
                .flat_map(|&atom| store.incoming_set(atom))
                .collect();
        }
        Ok(frontier
            .into_iter()
            .filter(|&atom| store.type_of(atom).map_or(false, |t| t == clause_type))
            .collect())
    }

    /// The shallowest constant node or bound variable in a clause.
    fn find_anchor(
        &self,
        store: &dyn AtomStore,
        clause: AtomId,
        grounding: &Grounding,
    ) -> PatternResult<Option<(AtomId, usize)>> {
        let mut queue = VecDeque::from([(clause, 0usize)]);
        while let Some((term, depth)) = queue.pop_front() {
            if self.variables.contains(term) {
                if let Some(ground) = grounding.get(term) {
                    return Ok(Some((ground, depth)));
                }
            } else if store.is_node(term) {
                return Ok(Some((term, depth)));
            } else {
                for &child in store.outgoing_set(term)? {
                    queue.push_back((child, depth + 1));
                }
            }
        }
        Ok(None)
    }
}
