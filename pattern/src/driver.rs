//! Match driver: validates query structures and runs the search.

use crate::clauses::classify;
use crate::variables::{find_variables, resolve_declarations};
use crate::{
    AtomStore, Implicator, PatternError, PatternMatchCallback, PatternMatchEngine, PatternResult,
    SchemaRegistry, VariableSet,
};
use tracing::{debug, warn};
use weft_core::AtomId;

/// Entry points for pattern matching and implication over one store.
pub struct PatternMatch<'a> {
    store: &'a mut dyn AtomStore,
    schemas: SchemaRegistry,
}

impl<'a> PatternMatch<'a> {
    pub fn new(store: &'a mut dyn AtomStore) -> Self {
        Self {
            store,
            schemas: SchemaRegistry::new(),
        }
    }

    /// Schemas available to `ExecutionOutputLink`s in implicands.
    pub fn with_schemas(mut self, schemas: SchemaRegistry) -> Self {
        self.schemas = schemas;
        self
    }

    pub fn store(&self) -> &dyn AtomStore {
        &*self.store
    }

    pub fn store_mut(&mut self) -> &mut dyn AtomStore {
        &mut *self.store
    }

    // ==================== Lower-level entry points ====================

    /// Run the search on pre-split clauses.
    pub fn do_match(
        &mut self,
        callback: &mut dyn PatternMatchCallback,
        variables: &VariableSet,
        affirmed: &[AtomId],
        negated: &[AtomId],
    ) -> PatternResult<()> {
        PatternMatchEngine::new(variables, affirmed, negated).run(&mut *self.store, callback)?;
        Ok(())
    }

    /// Run an `ImplicationLink(predicate, implicand)`.
    ///
    /// An empty `variables` set is inferred from the predicate.
    pub fn do_imply(
        &mut self,
        implication: AtomId,
        implicator: &mut Implicator,
        variables: VariableSet,
    ) -> PatternResult<()> {
        let variables = if variables.is_empty() {
            let (predicate, _) = self.expect_pair(implication, "ImplicationLink")?;
            let found = find_variables(&*self.store, predicate)?;
            debug!(variables = found.len(), "inferred variables from predicate");
            found
        } else {
            variables
        };
        self.run_implication(implication, implicator, &variables)
    }

    /// Run a `BindLink(declarations, ImplicationLink(predicate, implicand))`.
    ///
    /// The declarations are taken as given: an empty `ListLink` declares no
    /// variables, and every variable in the predicate is then a constant.
    pub fn do_bindlink(&mut self, bind: AtomId, implicator: &mut Implicator) -> PatternResult<()> {
        let (decls, implication) = self.expect_pair(bind, "BindLink")?;
        let declarations = resolve_declarations(&*self.store, decls)?;
        // Validate the implication before the implicator takes the restrictions.
        self.expect_pair(implication, "ImplicationLink")?;

        implicator.set_type_restrictions(declarations.restrictions);
        self.run_implication(implication, implicator, &declarations.variables)
    }

    /// `match(variables, clauses, negated?)`: a `ListLink` of variables, an
    /// `AndLink` of clauses and an optional `AndLink` of negated clauses.
    pub fn match_clauses(
        &mut self,
        callback: &mut dyn PatternMatchCallback,
        variables: AtomId,
        clauses: AtomId,
        negated: Option<AtomId>,
    ) -> PatternResult<()> {
        let core = *self.store.core();
        self.expect_type(variables, core.list_link, "ListLink")?;
        self.expect_type(clauses, core.and_link, "AndLink")?;
        if let Some(negated) = negated {
            self.expect_type(negated, core.and_link, "AndLink")?;
        }

        let declarations = resolve_declarations(&*self.store, variables)?;
        let affirmed = self.store.outgoing_set(clauses)?.to_vec();
        let negated = match negated {
            Some(negated) => self.store.outgoing_set(negated)?.to_vec(),
            None => Vec::new(),
        };

        debug!(
            variables = declarations.variables.len(),
            affirmed = affirmed.len(),
            negated = negated.len(),
            "match"
        );
        callback.set_type_restrictions(declarations.restrictions);
        self.do_match(callback, &declarations.variables, &affirmed, &negated)
    }

    // ==================== Public entry points ====================

    /// Every accepted result, in discovery order, as a `ListLink`.
    pub fn bindlink(&mut self, bind: AtomId) -> PatternResult<AtomId> {
        debug!(%bind, "bindlink");
        let mut implicator = Implicator::collect_all().with_schemas(self.schemas.clone());
        self.run_bind(bind, &mut implicator)
    }

    /// At most one result, as a `ListLink`.
    pub fn single_bindlink(&mut self, bind: AtomId) -> PatternResult<AtomId> {
        debug!(%bind, "single_bindlink");
        let mut implicator = Implicator::collect_first().with_schemas(self.schemas.clone());
        self.run_bind(bind, &mut implicator)
    }

    /// Results of the crisp-logic policy, each forced to true, as a `ListLink`.
    pub fn crisp_logic_bindlink(&mut self, bind: AtomId) -> PatternResult<AtomId> {
        debug!(%bind, "crisp_logic_bindlink");
        let mut implicator = Implicator::crisp().with_schemas(self.schemas.clone());
        self.run_bind(bind, &mut implicator)
    }

    /// Run an implication with an explicit variable set, bypassing
    /// declaration parsing. An empty set is inferred.
    pub fn imply(&mut self, implication: AtomId, variables: &VariableSet) -> PatternResult<AtomId> {
        debug!(%implication, "imply");
        let mut implicator = Implicator::collect_all().with_schemas(self.schemas.clone());
        self.do_imply(implication, &mut implicator, variables.clone())?;
        self.aggregate(implicator.results())
    }

    /// Crisp-logic variant of [`imply`](Self::imply).
    pub fn crisp_logic_imply(
        &mut self,
        implication: AtomId,
        variables: &VariableSet,
    ) -> PatternResult<AtomId> {
        debug!(%implication, "crisp_logic_imply");
        let mut implicator = Implicator::crisp().with_schemas(self.schemas.clone());
        self.do_imply(implication, &mut implicator, variables.clone())?;
        self.aggregate(implicator.results())
    }

    /// Run a bind structure with a caller-supplied implicator and package
    /// its results.
    pub fn run_bind(&mut self, bind: AtomId, implicator: &mut Implicator) -> PatternResult<AtomId> {
        self.do_bindlink(bind, implicator)?;
        self.aggregate(implicator.results())
    }

    // ==================== Helpers ====================

    fn run_implication(
        &mut self,
        implication: AtomId,
        implicator: &mut Implicator,
        variables: &VariableSet,
    ) -> PatternResult<()> {
        let (predicate, implicand) = self.expect_pair(implication, "ImplicationLink")?;
        let store = &*self.store;

        if !store.is_link(predicate) {
            return Err(PatternError::structural(
                "a link holding clauses",
                store.type_name_of(predicate),
            ));
        }
        let clauses = classify(store, predicate)?;

        implicator.begin(implicand)?;
        let outcome = self.do_match(
            &mut *implicator,
            variables,
            &clauses.affirmed,
            &clauses.negated,
        );
        implicator.finish();
        outcome
    }

    fn aggregate(&mut self, results: &[AtomId]) -> PatternResult<AtomId> {
        let list = self.store.core().list_link;
        debug!(results = results.len(), "packaging results");
        Ok(self.store.add_link(list, results.to_vec())?)
    }

    fn expect_type(
        &self,
        term: AtomId,
        expected: weft_core::TypeId,
        expected_name: &str,
    ) -> PatternResult<()> {
        let actual = self.store.type_of(term)?;
        if actual != expected {
            let err = PatternError::structural(expected_name, self.store.type_name(actual));
            warn!(error = %err, "rejected query structure");
            return Err(err);
        }
        Ok(())
    }

    /// Check the type tag and arity of a two-child form.
    fn expect_pair(&self, term: AtomId, form: &str) -> PatternResult<(AtomId, AtomId)> {
        let expected = self
            .store
            .type_name_to_tag(form)
            .ok_or_else(|| PatternError::unknown_type(form))?;
        self.expect_type(term, expected, form)?;

        match self.store.outgoing_set(term)? {
            &[first, second] => Ok((first, second)),
            other => {
                let err = PatternError::wrong_arity(form, 2, other.len());
                warn!(error = %err, "rejected query structure");
                Err(err)
            }
        }
    }
}
