//! Core atom storage implementation.

use crate::index::{DedupIndex, IncomingIndex, TypeIndex};
use std::collections::HashMap;
use std::sync::Arc;
use weft_core::{Atom, AtomId, Link, Node, StoreError, StoreResult, TruthValue, TypeId};
use weft_registry::{AtomKind, Registry};

/// ID allocator for atoms.
#[derive(Debug)]
struct IdAllocator {
    next_atom_id: u64,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next_atom_id: 1 }
    }

    fn alloc(&mut self) -> AtomId {
        let id = AtomId::new(self.next_atom_id);
        self.next_atom_id += 1;
        id
    }
}

/// The in-memory atom storage.
///
/// Atoms are structurally deduplicated: adding a node with an existing
/// (type, name), or a link with an existing (type, outgoing set), returns the
/// existing atom.
#[derive(Debug)]
pub struct AtomSpace {
    /// Type registry shared with the pattern matcher.
    registry: Arc<Registry>,
    /// Atom storage
    atoms: HashMap<AtomId, Atom>,
    /// ID allocator
    id_alloc: IdAllocator,
    /// Type index
    type_index: TypeIndex,
    /// Incoming-set index
    incoming: IncomingIndex,
    /// Deduplication index
    dedup: DedupIndex,
}

impl AtomSpace {
    /// Create a new empty atom space over the given registry.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            atoms: HashMap::new(),
            id_alloc: IdAllocator::new(),
            type_index: TypeIndex::new(),
            incoming: IncomingIndex::new(),
            dedup: DedupIndex::new(),
        }
    }

    /// Create a new empty atom space with the standard types only.
    pub fn with_standard_types() -> Self {
        Self::new(Arc::new(Registry::standard()))
    }

    /// The type registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// A shared handle to the type registry.
    pub fn registry_handle(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    fn check_kind(&self, type_id: TypeId, expected: AtomKind) -> StoreResult<()> {
        let def = self
            .registry
            .get_type(type_id)
            .ok_or(StoreError::TypeNotFound(type_id))?;
        if def.kind != Some(expected) {
            return Err(StoreError::kind_mismatch(expected.as_str(), def.name.clone()));
        }
        Ok(())
    }

    // ==================== Insertion ====================

    /// Add a node, or return the existing node with the same type and name.
    pub fn add_node(&mut self, type_id: TypeId, name: impl Into<String>) -> StoreResult<AtomId> {
        self.check_kind(type_id, AtomKind::Node)?;
        let name = name.into();

        if let Some(existing) = self.dedup.find_node(type_id, &name) {
            return Ok(existing);
        }

        let id = self.id_alloc.alloc();
        self.type_index.insert(type_id, id);
        self.dedup.insert_node(type_id, name.clone(), id);
        self.atoms.insert(id, Atom::Node(Node::new(id, type_id, name)));
        Ok(id)
    }

    /// Add a link, or return the existing link with the same type and outgoing set.
    pub fn add_link(&mut self, type_id: TypeId, outgoing: Vec<AtomId>) -> StoreResult<AtomId> {
        self.check_kind(type_id, AtomKind::Link)?;

        // Validate that all targets exist
        for target in &outgoing {
            if !self.atoms.contains_key(target) {
                return Err(StoreError::AtomNotFound(*target));
            }
        }

        if let Some(existing) = self.dedup.find_link(type_id, &outgoing) {
            return Ok(existing);
        }

        let id = self.id_alloc.alloc();
        self.type_index.insert(type_id, id);
        self.incoming.insert(id, &outgoing);
        self.dedup.insert_link(type_id, outgoing.clone(), id);
        self.atoms.insert(id, Atom::Link(Link::new(id, type_id, outgoing)));
        Ok(id)
    }

    /// Add a node by type name.
    pub fn add_node_named(&mut self, type_name: &str, name: impl Into<String>) -> StoreResult<AtomId> {
        let type_id = self.resolve_type(type_name)?;
        self.add_node(type_id, name)
    }

    /// Add a link by type name.
    pub fn add_link_named(&mut self, type_name: &str, outgoing: Vec<AtomId>) -> StoreResult<AtomId> {
        let type_id = self.resolve_type(type_name)?;
        self.add_link(type_id, outgoing)
    }

    fn resolve_type(&self, type_name: &str) -> StoreResult<TypeId> {
        self.registry
            .get_type_id(type_name)
            .ok_or_else(|| StoreError::InvalidOperation(format!("unknown type '{}'", type_name)))
    }

    // ==================== Removal ====================

    /// Remove an atom that no link refers to.
    pub fn remove_atom(&mut self, id: AtomId) -> StoreResult<()> {
        if !self.atoms.contains_key(&id) {
            return Err(StoreError::AtomNotFound(id));
        }
        if !self.incoming.is_empty_for(id) {
            return Err(StoreError::AtomHasIncoming(id));
        }
        self.unlink(id);
        Ok(())
    }

    /// Remove an atom and, first, every link above it.
    pub fn remove_atom_recursive(&mut self, id: AtomId) -> StoreResult<()> {
        if !self.atoms.contains_key(&id) {
            return Err(StoreError::AtomNotFound(id));
        }

        let above: Vec<AtomId> = self.incoming.get(id).collect();
        for link in above {
            // A link may already be gone if it sat above two removed atoms.
            if self.atoms.contains_key(&link) {
                self.remove_atom_recursive(link)?;
            }
        }

        self.unlink(id);
        Ok(())
    }

    fn unlink(&mut self, id: AtomId) {
        let Some(atom) = self.atoms.remove(&id) else {
            return;
        };
        self.type_index.remove(atom.type_id(), id);
        match &atom {
            Atom::Node(node) => self.dedup.remove_node(node.type_id, &node.name),
            Atom::Link(link) => {
                self.incoming.remove(id, &link.outgoing);
                self.dedup.remove_link(link.type_id, &link.outgoing);
            }
        }
    }

    // ==================== Lookups ====================

    /// Get an atom by ID.
    pub fn get_atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(&id)
    }

    /// Type tag of an atom.
    pub fn type_of(&self, id: AtomId) -> StoreResult<TypeId> {
        self.get_atom(id)
            .map(Atom::type_id)
            .ok_or(StoreError::AtomNotFound(id))
    }

    /// Ordered outgoing set of an atom (empty for nodes).
    pub fn outgoing_set(&self, id: AtomId) -> StoreResult<&[AtomId]> {
        self.get_atom(id)
            .map(Atom::outgoing)
            .ok_or(StoreError::AtomNotFound(id))
    }

    /// Links whose outgoing set contains the atom.
    pub fn incoming_set(&self, id: AtomId) -> impl Iterator<Item = AtomId> + '_ {
        self.incoming.get(id)
    }

    /// Find an existing node without creating it.
    pub fn find_node(&self, type_id: TypeId, name: &str) -> Option<AtomId> {
        self.dedup.find_node(type_id, name)
    }

    /// Find an existing link without creating it.
    pub fn find_link(&self, type_id: TypeId, outgoing: &[AtomId]) -> Option<AtomId> {
        self.dedup.find_link(type_id, outgoing)
    }

    /// Atoms of exactly this type, in creation order.
    pub fn atoms_by_type(&self, type_id: TypeId) -> impl Iterator<Item = AtomId> + '_ {
        self.type_index.get(type_id)
    }

    /// Atoms of this type or any subtype.
    pub fn atoms_by_type_recursive(&self, type_id: TypeId) -> Vec<AtomId> {
        let mut ids: Vec<AtomId> = self.type_index.get(type_id).collect();
        for subtype_id in self.registry.get_subtypes(type_id) {
            ids.extend(self.type_index.get(subtype_id));
        }
        ids.sort();
        ids
    }

    // ==================== Truth values ====================

    pub fn get_truth_value(&self, id: AtomId) -> StoreResult<TruthValue> {
        self.get_atom(id)
            .map(Atom::truth_value)
            .ok_or(StoreError::AtomNotFound(id))
    }

    pub fn set_truth_value(&mut self, id: AtomId, tv: TruthValue) -> StoreResult<()> {
        let atom = self.atoms.get_mut(&id).ok_or(StoreError::AtomNotFound(id))?;
        atom.set_truth_value(tv);
        Ok(())
    }

    // ==================== Statistics ====================

    /// Get the number of atoms in the store.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Get all atom IDs.
    pub fn all_atom_ids(&self) -> impl Iterator<Item = AtomId> + '_ {
        self.atoms.keys().copied()
    }
}
