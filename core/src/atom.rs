//! Atom structures for Weft.
//!
//! Nodes and links are the two fundamental atom kinds in the hypergraph.
//! A node is a named leaf; a link is an ordered sequence of other atoms.

use crate::{AtomId, TruthValue, TypeId};

/// A named leaf of the hypergraph.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier for this node.
    pub id: AtomId,
    /// Type of this node (reference to registry).
    pub type_id: TypeId,
    /// Node name; (type, name) is unique in a store.
    pub name: String,
    /// Mutable truth value.
    pub tv: TruthValue,
}

impl Node {
    /// Create a new node with the default truth value.
    pub fn new(id: AtomId, type_id: TypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            type_id,
            name: name.into(),
            tv: TruthValue::DEFAULT,
        }
    }
}

/// A link in the hypergraph.
///
/// Links target one or more atoms (nodes or other links), in order.
#[derive(Debug, Clone)]
pub struct Link {
    /// Unique identifier for this link.
    pub id: AtomId,
    /// Type of this link (reference to registry).
    pub type_id: TypeId,
    /// Ordered outgoing set.
    pub outgoing: Vec<AtomId>,
    /// Mutable truth value.
    pub tv: TruthValue,
}

impl Link {
    /// Create a new link with the default truth value.
    pub fn new(id: AtomId, type_id: TypeId, outgoing: Vec<AtomId>) -> Self {
        Self {
            id,
            type_id,
            outgoing,
            tv: TruthValue::DEFAULT,
        }
    }

    /// Get the arity (number of outgoing atoms) of this link.
    pub fn arity(&self) -> usize {
        self.outgoing.len()
    }

    /// Get the outgoing atom at a specific position.
    pub fn target(&self, position: usize) -> Option<AtomId> {
        self.outgoing.get(position).copied()
    }

    /// Check if this link involves a specific atom.
    pub fn involves(&self, atom: AtomId) -> bool {
        self.outgoing.contains(&atom)
    }
}

/// Either kind of atom.
#[derive(Debug, Clone)]
pub enum Atom {
    Node(Node),
    Link(Link),
}

impl Atom {
    pub fn id(&self) -> AtomId {
        match self {
            Atom::Node(n) => n.id,
            Atom::Link(l) => l.id,
        }
    }

    pub fn type_id(&self) -> TypeId {
        match self {
            Atom::Node(n) => n.type_id,
            Atom::Link(l) => l.type_id,
        }
    }

    pub fn truth_value(&self) -> TruthValue {
        match self {
            Atom::Node(n) => n.tv,
            Atom::Link(l) => l.tv,
        }
    }

    pub fn set_truth_value(&mut self, tv: TruthValue) {
        match self {
            Atom::Node(n) => n.tv = tv,
            Atom::Link(l) => l.tv = tv,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Atom::Node(_))
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Atom::Link(_))
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Atom::Node(n) => Some(n),
            Atom::Link(_) => None,
        }
    }

    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Atom::Node(_) => None,
            Atom::Link(l) => Some(l),
        }
    }

    /// Node name, if this is a node.
    pub fn name(&self) -> Option<&str> {
        self.as_node().map(|n| n.name.as_str())
    }

    /// Outgoing set; empty for nodes.
    pub fn outgoing(&self) -> &[AtomId] {
        match self {
            Atom::Node(_) => &[],
            Atom::Link(l) => &l.outgoing,
        }
    }
}
