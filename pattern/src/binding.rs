//! Groundings produced by the search.

use std::collections::BTreeMap;
use weft_core::AtomId;

/// One successful match: variables to their grounds, and clauses to the
/// terms that satisfied them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grounding {
    variables: BTreeMap<AtomId, AtomId>,
    clauses: BTreeMap<AtomId, AtomId>,
}

impl Grounding {
    /// Create an empty grounding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the ground of a variable.
    pub fn get(&self, var: AtomId) -> Option<AtomId> {
        self.variables.get(&var).copied()
    }

    /// Check if a variable is bound.
    pub fn is_bound(&self, var: AtomId) -> bool {
        self.variables.contains_key(&var)
    }

    /// Bind a variable.
    pub fn bind(&mut self, var: AtomId, ground: AtomId) {
        self.variables.insert(var, ground);
    }

    /// Clone with an additional binding.
    pub fn with_binding(&self, var: AtomId, ground: AtomId) -> Self {
        let mut extended = self.clone();
        extended.bind(var, ground);
        extended
    }

    /// Record the term that satisfied a clause.
    pub fn ground_clause(&mut self, clause: AtomId, ground: AtomId) {
        self.clauses.insert(clause, ground);
    }

    /// The term that satisfied a clause.
    pub fn clause_ground(&self, clause: AtomId) -> Option<AtomId> {
        self.clauses.get(&clause).copied()
    }

    /// Variable substitution, ordered by variable.
    pub fn variables(&self) -> impl Iterator<Item = (AtomId, AtomId)> + '_ {
        self.variables.iter().map(|(v, g)| (*v, *g))
    }

    /// Clause substitution, ordered by clause.
    pub fn clauses(&self) -> impl Iterator<Item = (AtomId, AtomId)> + '_ {
        self.clauses.iter().map(|(c, g)| (*c, *g))
    }

    /// Get the number of bound variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Check if no variable is bound.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl FromIterator<(AtomId, AtomId)> for Grounding {
    fn from_iter<I: IntoIterator<Item = (AtomId, AtomId)>>(iter: I) -> Self {
        Self {
            variables: iter.into_iter().collect(),
            clauses: BTreeMap::new(),
        }
    }
}
