//! Template instantiation under a grounding.

use crate::variables::is_variable;
use crate::{AtomStore, Grounding, InstantiateError, SchemaError};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use weft_core::{Atom, AtomId, StoreError, TypeId};

/// A grounded schema: computes an atom from its instantiated arguments.
pub type SchemaFn =
    dyn Fn(&mut dyn AtomStore, &[AtomId]) -> Result<AtomId, SchemaError> + Send + Sync;

/// Named grounded schemas, executed through `ExecutionOutputLink`.
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<SchemaFn>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema, replacing any previous one with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, schema: F)
    where
        F: Fn(&mut dyn AtomStore, &[AtomId]) -> Result<AtomId, SchemaError>
            + Send
            + Sync
            + 'static,
    {
        self.schemas.insert(name.into(), Arc::new(schema));
    }

    pub fn with<F>(mut self, name: impl Into<String>, schema: F) -> Self
    where
        F: Fn(&mut dyn AtomStore, &[AtomId]) -> Result<AtomId, SchemaError>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, schema);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<SchemaFn>> {
        self.schemas.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("SchemaRegistry").field("schemas", &names).finish()
    }
}

/// A resolved template, ready to be written to the store.
enum Plan {
    Existing(AtomId),
    Link { type_id: TypeId, children: Vec<Plan> },
    Execute { schema: Arc<SchemaFn>, args: Vec<Plan> },
}

/// Rebuilds templates under a substitution.
#[derive(Debug, Clone, Default)]
pub struct Instantiator {
    schemas: SchemaRegistry,
}

impl Instantiator {
    pub fn new(schemas: SchemaRegistry) -> Self {
        Self { schemas }
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    /// Instantiate `template`, replacing every variable by its ground.
    ///
    /// The template is resolved in full before anything is written, so an
    /// unbound variable or an unknown schema leaves the store untouched.
    /// Unchanged subterms are reused; rebuilt links are deduplicated by the
    /// store.
    pub fn instantiate(
        &self,
        store: &mut dyn AtomStore,
        template: AtomId,
        grounding: &Grounding,
    ) -> Result<AtomId, InstantiateError> {
        let plan = self.plan(&*store, template, grounding)?;
        Self::build(store, plan)
    }

    fn plan(
        &self,
        store: &dyn AtomStore,
        term: AtomId,
        grounding: &Grounding,
    ) -> Result<Plan, InstantiateError> {
        if is_variable(store, term) {
            return grounding
                .get(term)
                .map(Plan::Existing)
                .ok_or(InstantiateError::UnboundVariable(term));
        }

        let Some(atom) = store.atom(term) else {
            return Err(StoreError::AtomNotFound(term).into());
        };
        let Atom::Link(link) = atom else {
            return Ok(Plan::Existing(term));
        };

        if link.type_id == store.core().execution_output_link {
            return self.plan_execution(store, &link.outgoing, grounding);
        }

        let children = link
            .outgoing
            .iter()
            .map(|&child| self.plan(store, child, grounding))
            .collect::<Result<Vec<_>, _>>()?;

        let unchanged = children
            .iter()
            .zip(&link.outgoing)
            .all(|(plan, &original)| matches!(plan, Plan::Existing(id) if *id == original));
        if unchanged {
            return Ok(Plan::Existing(term));
        }

        Ok(Plan::Link {
            type_id: link.type_id,
            children,
        })
    }

    /// `ExecutionOutputLink(GroundedSchemaNode name, ListLink args...)`
    fn plan_execution(
        &self,
        store: &dyn AtomStore,
        outgoing: &[AtomId],
        grounding: &Grounding,
    ) -> Result<Plan, InstantiateError> {
        let core = *store.core();
        let &[schema_node, args] = outgoing else {
            return Err(InstantiateError::evaluation(format!(
                "ExecutionOutputLink expects 2 children, got {}",
                outgoing.len()
            )));
        };

        if store.type_of(schema_node)? != core.grounded_schema_node {
            return Err(InstantiateError::evaluation(format!(
                "expected GroundedSchemaNode, got {}",
                store.type_name_of(schema_node)
            )));
        }
        let name = store.name(schema_node).unwrap_or_default();
        let schema = self
            .schemas
            .get(name)
            .ok_or_else(|| InstantiateError::evaluation(format!("unknown schema '{}'", name)))?;

        if store.type_of(args)? != core.list_link {
            return Err(InstantiateError::evaluation(format!(
                "expected ListLink of arguments, got {}",
                store.type_name_of(args)
            )));
        }
        let args = store
            .outgoing_set(args)?
            .iter()
            .map(|&arg| self.plan(store, arg, grounding))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Plan::Execute { schema, args })
    }

    fn build(store: &mut dyn AtomStore, plan: Plan) -> Result<AtomId, InstantiateError> {
        match plan {
            Plan::Existing(id) => Ok(id),
            Plan::Link { type_id, children } => {
                let outgoing = children
                    .into_iter()
                    .map(|child| Self::build(&mut *store, child))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(store.add_link(type_id, outgoing)?)
            }
            Plan::Execute { schema, args } => {
                let args = args
                    .into_iter()
                    .map(|arg| Self::build(&mut *store, arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((*schema)(store, &args)?)
            }
        }
    }
}
