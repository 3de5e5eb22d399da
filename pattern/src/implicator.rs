//! The implicator: turns groundings into instantiated results.

use crate::{
    AtomStore, Grounding, Instantiator, PatternError, PatternMatchCallback, PatternResult,
    SchemaRegistry, TypeRestrictions,
};
use std::fmt;
use tracing::{debug, trace};
use weft_core::{AtomId, TruthValue};

/// How groundings are accepted and when the search stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptancePolicy {
    /// Accept every grounding and never stop early.
    CollectAll,
    /// Stop after the first accepted result.
    CollectFirst,
    /// Gate clauses on truth values and force results to true.
    TruthFiltered,
}

/// Lifecycle of one implicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImplicatorState {
    Idle,
    Searching,
    Done,
}

/// Called after each accepted result; `true` stops the search.
pub type StopHook = Box<dyn FnMut(&Grounding, AtomId) -> bool>;

/// A single-use grounding consumer that instantiates an implicand.
pub struct Implicator {
    policy: AcceptancePolicy,
    state: ImplicatorState,
    implicand: Option<AtomId>,
    results: Vec<AtomId>,
    instantiator: Instantiator,
    restrictions: TypeRestrictions,
    stop_hook: Option<StopHook>,
}

impl Implicator {
    pub fn new(policy: AcceptancePolicy) -> Self {
        Self {
            policy,
            state: ImplicatorState::Idle,
            implicand: None,
            results: Vec::new(),
            instantiator: Instantiator::default(),
            restrictions: TypeRestrictions::new(),
            stop_hook: None,
        }
    }

    /// Collect every result.
    pub fn collect_all() -> Self {
        Self::new(AcceptancePolicy::CollectAll)
    }

    /// Collect at most one result.
    pub fn collect_first() -> Self {
        Self::new(AcceptancePolicy::CollectFirst)
    }

    /// Crisp-logic acceptance.
    pub fn crisp() -> Self {
        Self::new(AcceptancePolicy::TruthFiltered)
    }

    /// Use these schemas when instantiating `ExecutionOutputLink`s.
    pub fn with_schemas(mut self, schemas: SchemaRegistry) -> Self {
        self.instantiator = Instantiator::new(schemas);
        self
    }

    /// Install a hook run after every accepted result.
    pub fn with_stop_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&Grounding, AtomId) -> bool + 'static,
    {
        self.stop_hook = Some(Box::new(hook));
        self
    }

    pub fn policy(&self) -> AcceptancePolicy {
        self.policy
    }

    pub fn state(&self) -> ImplicatorState {
        self.state
    }

    pub fn implicand(&self) -> Option<AtomId> {
        self.implicand
    }

    /// Results accepted so far, in discovery order.
    pub fn results(&self) -> &[AtomId] {
        &self.results
    }

    pub fn into_results(self) -> Vec<AtomId> {
        self.results
    }

    /// Attach the implicand and start searching.
    pub fn begin(&mut self, implicand: AtomId) -> PatternResult<()> {
        if self.state != ImplicatorState::Idle {
            return Err(PatternError::ImplicatorInUse);
        }
        self.implicand = Some(implicand);
        self.state = ImplicatorState::Searching;
        Ok(())
    }

    /// Mark the run as finished.
    pub fn finish(&mut self) {
        self.state = ImplicatorState::Done;
        debug!(results = self.results.len(), policy = ?self.policy, "implication finished");
    }

    fn accept(&mut self, store: &mut dyn AtomStore, grounding: &Grounding) -> Option<AtomId> {
        let implicand = self.implicand?;
        let result = match self.instantiator.instantiate(store, implicand, grounding) {
            Ok(result) => result,
            Err(e) => {
                debug!(error = %e, "skipping candidate");
                return None;
            }
        };

        if self.policy == AcceptancePolicy::TruthFiltered {
            if let Err(e) = store.set_truth_value(result, TruthValue::TRUE) {
                debug!(error = %e, "skipping candidate");
                return None;
            }
        }

        trace!(%result, "accepted result");
        self.results.push(result);
        Some(result)
    }
}

impl fmt::Debug for Implicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implicator")
            .field("policy", &self.policy)
            .field("state", &self.state)
            .field("implicand", &self.implicand)
            .field("results", &self.results)
            .field("stop_hook", &self.stop_hook.is_some())
            .finish()
    }
}

impl PatternMatchCallback for Implicator {
    fn set_type_restrictions(&mut self, restrictions: TypeRestrictions) {
        self.restrictions = restrictions;
    }

    fn type_restrictions(&self) -> Option<&TypeRestrictions> {
        Some(&self.restrictions)
    }

    fn clause_match(&mut self, store: &dyn AtomStore, _clause: AtomId, ground: AtomId) -> bool {
        match self.policy {
            AcceptancePolicy::TruthFiltered => {
                store.get_truth_value(ground).map_or(false, |tv| tv.is_true())
            }
            _ => true,
        }
    }

    fn optional_clause_match(
        &mut self,
        store: &dyn AtomStore,
        _clause: AtomId,
        ground: Option<AtomId>,
    ) -> bool {
        match (self.policy, ground) {
            (_, None) => true,
            (AcceptancePolicy::TruthFiltered, Some(ground)) => {
                store.get_truth_value(ground).map_or(false, |tv| !tv.is_true())
            }
            (_, Some(_)) => false,
        }
    }

    fn grounding(&mut self, store: &mut dyn AtomStore, grounding: &Grounding) -> bool {
        if self.state != ImplicatorState::Searching {
            return false;
        }
        let Some(result) = self.accept(store, grounding) else {
            return false;
        };

        let mut stop = self.policy == AcceptancePolicy::CollectFirst;
        if let Some(hook) = self.stop_hook.as_mut() {
            stop |= hook(grounding, result);
        }
        stop
    }
}
