//! Indexes for efficient atom lookups.

use std::collections::{BTreeSet, HashMap};
use weft_core::{AtomId, TypeId};

/// Type index: TypeId -> Set<AtomId>
///
/// Sets are ordered so that enumeration follows creation order.
#[derive(Debug, Default)]
pub struct TypeIndex {
    index: HashMap<TypeId, BTreeSet<AtomId>>,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, type_id: TypeId, atom: AtomId) {
        self.index.entry(type_id).or_default().insert(atom);
    }

    pub fn remove(&mut self, type_id: TypeId, atom: AtomId) {
        if let Some(set) = self.index.get_mut(&type_id) {
            set.remove(&atom);
            if set.is_empty() {
                self.index.remove(&type_id);
            }
        }
    }

    pub fn get(&self, type_id: TypeId) -> impl Iterator<Item = AtomId> + '_ {
        self.index
            .get(&type_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }
}

/// Incoming index: atom -> links whose outgoing set contains it.
#[derive(Debug, Default)]
pub struct IncomingIndex {
    index: HashMap<AtomId, BTreeSet<AtomId>>,
}

impl IncomingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, link: AtomId, outgoing: &[AtomId]) {
        for target in outgoing {
            self.index.entry(*target).or_default().insert(link);
        }
    }

    pub fn remove(&mut self, link: AtomId, outgoing: &[AtomId]) {
        for target in outgoing {
            if let Some(set) = self.index.get_mut(target) {
                set.remove(&link);
                if set.is_empty() {
                    self.index.remove(target);
                }
            }
        }
    }

    pub fn get(&self, atom: AtomId) -> impl Iterator<Item = AtomId> + '_ {
        self.index
            .get(&atom)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn is_empty_for(&self, atom: AtomId) -> bool {
        self.index.get(&atom).map_or(true, |set| set.is_empty())
    }
}

/// Structural deduplication: one atom per (type, name) and per (type, outgoing).
#[derive(Debug, Default)]
pub struct DedupIndex {
    nodes: HashMap<(TypeId, String), AtomId>,
    links: HashMap<(TypeId, Vec<AtomId>), AtomId>,
}

impl DedupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_node(&self, type_id: TypeId, name: &str) -> Option<AtomId> {
        // Tuple keys cannot be borrowed as (TypeId, &str); allocate for the probe.
        self.nodes.get(&(type_id, name.to_string())).copied()
    }

    pub fn find_link(&self, type_id: TypeId, outgoing: &[AtomId]) -> Option<AtomId> {
        self.links.get(&(type_id, outgoing.to_vec())).copied()
    }

    pub fn insert_node(&mut self, type_id: TypeId, name: String, atom: AtomId) {
        self.nodes.insert((type_id, name), atom);
    }

    pub fn insert_link(&mut self, type_id: TypeId, outgoing: Vec<AtomId>, atom: AtomId) {
        self.links.insert((type_id, outgoing), atom);
    }

    pub fn remove_node(&mut self, type_id: TypeId, name: &str) {
        self.nodes.remove(&(type_id, name.to_string()));
    }

    pub fn remove_link(&mut self, type_id: TypeId, outgoing: &[AtomId]) {
        self.links.remove(&(type_id, outgoing.to_vec()));
    }
}
