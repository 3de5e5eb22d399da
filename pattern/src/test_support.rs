//! Small atom-building helpers shared by the unit tests.

use crate::AtomStore;
use weft_core::AtomId;
use weft_graph::AtomSpace;
use weft_registry::CoreTypes;

pub struct Space {
    pub store: AtomSpace,
    pub core: CoreTypes,
}

impl Space {
    pub fn new() -> Self {
        let store = AtomSpace::with_standard_types();
        let core = *store.registry().core();
        Self { store, core }
    }

    pub fn node(&mut self, type_name: &str, name: &str) -> AtomId {
        self.store.add_node_named(type_name, name).unwrap()
    }

    pub fn link(&mut self, type_name: &str, outgoing: &[AtomId]) -> AtomId {
        self.store.add_link_named(type_name, outgoing.to_vec()).unwrap()
    }

    pub fn concept(&mut self, name: &str) -> AtomId {
        self.node("ConceptNode", name)
    }

    pub fn var(&mut self, name: &str) -> AtomId {
        self.node("VariableNode", name)
    }

    pub fn list(&mut self, outgoing: &[AtomId]) -> AtomId {
        self.link("ListLink", outgoing)
    }

    /// `Eval(Pred predicate, List(args...))`
    pub fn eval(&mut self, predicate: &str, args: &[AtomId]) -> AtomId {
        let pred = self.node("PredicateNode", predicate);
        let list = self.list(args);
        self.link("EvaluationLink", &[pred, list])
    }

    pub fn dyn_store(&mut self) -> &mut dyn AtomStore {
        &mut self.store
    }
}
