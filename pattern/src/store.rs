//! The capability interface the matcher consumes from a graph store.

use weft_core::{Atom, AtomId, StoreError, StoreResult, TruthValue, TypeId};
use weft_graph::AtomSpace;
use weft_registry::{CoreTypes, Registry};

/// A typed, structurally deduplicated hypergraph store.
///
/// Enumerations return owned snapshots, so a search may mutate the store
/// while it walks a candidate list.
pub trait AtomStore {
    /// The type registry the store was built over.
    fn registry(&self) -> &Registry;

    fn atom(&self, id: AtomId) -> Option<&Atom>;

    /// Atoms of exactly this type, in creation order.
    fn atoms_of_type(&self, type_id: TypeId) -> Vec<AtomId>;

    /// Links whose outgoing set contains the atom, in creation order.
    fn incoming_set(&self, id: AtomId) -> Vec<AtomId>;

    /// Add a node, returning the existing one on a (type, name) match.
    fn add_node(&mut self, type_id: TypeId, name: &str) -> StoreResult<AtomId>;

    /// Add a link, returning the existing one on a (type, outgoing) match.
    fn add_link(&mut self, type_id: TypeId, outgoing: Vec<AtomId>) -> StoreResult<AtomId>;

    fn get_truth_value(&self, id: AtomId) -> StoreResult<TruthValue>;

    fn set_truth_value(&mut self, id: AtomId, tv: TruthValue) -> StoreResult<()>;

    fn atom_count(&self) -> usize;

    // ==================== Provided ====================

    /// Tags of the standard types.
    fn core(&self) -> &CoreTypes {
        self.registry().core()
    }

    fn type_of(&self, id: AtomId) -> StoreResult<TypeId> {
        self.atom(id)
            .map(Atom::type_id)
            .ok_or(StoreError::AtomNotFound(id))
    }

    fn type_name_to_tag(&self, name: &str) -> Option<TypeId> {
        self.registry().get_type_id(name)
    }

    fn type_name(&self, type_id: TypeId) -> &str {
        self.registry().type_name(type_id).unwrap_or("<unknown>")
    }

    /// Type name of an atom, for error messages.
    fn type_name_of(&self, id: AtomId) -> &str {
        match self.type_of(id) {
            Ok(type_id) => self.type_name(type_id),
            Err(_) => "<missing>",
        }
    }

    fn is_subtype(&self, sub: TypeId, super_type: TypeId) -> bool {
        self.registry().is_subtype(sub, super_type)
    }

    fn outgoing_set(&self, id: AtomId) -> StoreResult<&[AtomId]> {
        self.atom(id)
            .map(Atom::outgoing)
            .ok_or(StoreError::AtomNotFound(id))
    }

    fn name(&self, id: AtomId) -> Option<&str> {
        self.atom(id).and_then(Atom::name)
    }

    fn is_node(&self, id: AtomId) -> bool {
        self.atom(id).map_or(false, Atom::is_node)
    }

    fn is_link(&self, id: AtomId) -> bool {
        self.atom(id).map_or(false, Atom::is_link)
    }
}

impl AtomStore for AtomSpace {
    fn registry(&self) -> &Registry {
        AtomSpace::registry(self)
    }

    fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.get_atom(id)
    }

    fn atoms_of_type(&self, type_id: TypeId) -> Vec<AtomId> {
        self.atoms_by_type(type_id).collect()
    }

    fn incoming_set(&self, id: AtomId) -> Vec<AtomId> {
        AtomSpace::incoming_set(self, id).collect()
    }

    fn add_node(&mut self, type_id: TypeId, name: &str) -> StoreResult<AtomId> {
        AtomSpace::add_node(self, type_id, name)
    }

    fn add_link(&mut self, type_id: TypeId, outgoing: Vec<AtomId>) -> StoreResult<AtomId> {
        AtomSpace::add_link(self, type_id, outgoing)
    }

    fn get_truth_value(&self, id: AtomId) -> StoreResult<TruthValue> {
        AtomSpace::get_truth_value(self, id)
    }

    fn set_truth_value(&mut self, id: AtomId, tv: TruthValue) -> StoreResult<()> {
        AtomSpace::set_truth_value(self, id, tv)
    }

    fn atom_count(&self) -> usize {
        AtomSpace::atom_count(self)
    }
}
