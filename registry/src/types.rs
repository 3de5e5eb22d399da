//! Type definition types.

use std::collections::{HashMap, HashSet};
use weft_core::TypeId;

/// Whether instances of a type are nodes or links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    Node,
    Link,
}

impl AtomKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AtomKind::Node => "node",
            AtomKind::Link => "link",
        }
    }
}

/// Atom type definition.
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// Unique identifier.
    pub id: TypeId,
    /// Type name.
    pub name: String,
    /// Parent type IDs (for inheritance).
    pub parent_ids: Vec<TypeId>,
    /// Node or link; `None` only for the abstract root `Atom`.
    pub kind: Option<AtomKind>,
}

impl TypeDef {
    pub fn new(id: TypeId, name: impl Into<String>, kind: Option<AtomKind>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_ids: Vec::new(),
            kind,
        }
    }

    pub fn is_node(&self) -> bool {
        self.kind == Some(AtomKind::Node)
    }

    pub fn is_link(&self) -> bool {
        self.kind == Some(AtomKind::Link)
    }
}

/// Standard atom types seeded into every registry, as `(name, parent)`.
///
/// Order matters: parents precede children.
pub const STANDARD_TYPES: &[(&str, &str)] = &[
    ("ConceptNode", "Node"),
    ("NumberNode", "Node"),
    ("PredicateNode", "Node"),
    ("WordNode", "Node"),
    ("VariableNode", "Node"),
    ("VariableTypeNode", "Node"),
    ("GroundedSchemaNode", "Node"),
    ("ListLink", "Link"),
    ("AndLink", "Link"),
    ("OrLink", "Link"),
    ("NotLink", "Link"),
    ("EvaluationLink", "Link"),
    ("ExecutionOutputLink", "Link"),
    ("InheritanceLink", "Link"),
    ("ImplicationLink", "Link"),
    ("BindLink", "Link"),
    ("TypedVariableLink", "Link"),
];

/// Tags of the standard types the pattern matcher dispatches on.
#[derive(Debug, Clone, Copy)]
pub struct CoreTypes {
    pub atom: TypeId,
    pub node: TypeId,
    pub link: TypeId,
    pub concept_node: TypeId,
    pub number_node: TypeId,
    pub predicate_node: TypeId,
    pub variable_node: TypeId,
    pub variable_type_node: TypeId,
    pub grounded_schema_node: TypeId,
    pub list_link: TypeId,
    pub and_link: TypeId,
    pub not_link: TypeId,
    pub evaluation_link: TypeId,
    pub execution_output_link: TypeId,
    pub implication_link: TypeId,
    pub bind_link: TypeId,
    pub typed_variable_link: TypeId,
}

impl CoreTypes {
    /// Resolve the core tags from a name table.
    ///
    /// Returns `None` if any standard type is missing.
    pub(crate) fn resolve(names: &HashMap<String, TypeId>) -> Option<Self> {
        let get = |name: &str| names.get(name).copied();
        Some(Self {
            atom: get("Atom")?,
            node: get("Node")?,
            link: get("Link")?,
            concept_node: get("ConceptNode")?,
            number_node: get("NumberNode")?,
            predicate_node: get("PredicateNode")?,
            variable_node: get("VariableNode")?,
            variable_type_node: get("VariableTypeNode")?,
            grounded_schema_node: get("GroundedSchemaNode")?,
            list_link: get("ListLink")?,
            and_link: get("AndLink")?,
            not_link: get("NotLink")?,
            evaluation_link: get("EvaluationLink")?,
            execution_output_link: get("ExecutionOutputLink")?,
            implication_link: get("ImplicationLink")?,
            bind_link: get("BindLink")?,
            typed_variable_link: get("TypedVariableLink")?,
        })
    }
}

/// Precomputed subtype relationships.
#[derive(Debug, Default)]
pub struct SubtypeIndex {
    /// For each type, the set of all its subtypes (transitive).
    subtypes: HashMap<TypeId, HashSet<TypeId>>,
    /// For each type, the set of all its supertypes (transitive).
    supertypes: HashMap<TypeId, HashSet<TypeId>>,
}

impl SubtypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the subtype index from type definitions.
    pub fn build(types: &HashMap<TypeId, TypeDef>) -> Self {
        let mut index = Self::new();

        for &type_id in types.keys() {
            index.subtypes.insert(type_id, HashSet::new());
            index.supertypes.insert(type_id, HashSet::new());
        }

        // Direct parents first
        for (type_id, type_def) in types {
            for &parent_id in &type_def.parent_ids {
                if let Some(parent_subtypes) = index.subtypes.get_mut(&parent_id) {
                    parent_subtypes.insert(*type_id);
                }
                if let Some(type_supertypes) = index.supertypes.get_mut(type_id) {
                    type_supertypes.insert(parent_id);
                }
            }
        }

        // Transitive closure; iterate until no changes
        let type_ids: Vec<TypeId> = types.keys().copied().collect();
        let mut changed = true;
        while changed {
            changed = false;
            for &type_id in &type_ids {
                let supertypes: Vec<TypeId> = index
                    .supertypes
                    .get(&type_id)
                    .map(|s| s.iter().copied().collect())
                    .unwrap_or_default();

                for super_id in supertypes {
                    let transitive: Vec<TypeId> = index
                        .supertypes
                        .get(&super_id)
                        .map(|s| s.iter().copied().collect())
                        .unwrap_or_default();

                    for trans_id in transitive {
                        if let Some(set) = index.supertypes.get_mut(&type_id) {
                            if set.insert(trans_id) {
                                changed = true;
                            }
                        }
                        if let Some(set) = index.subtypes.get_mut(&trans_id) {
                            set.insert(type_id);
                        }
                    }
                }
            }
        }

        index
    }

    /// Check if `sub` is a subtype of `super_type` (reflexive).
    pub fn is_subtype(&self, sub: TypeId, super_type: TypeId) -> bool {
        if sub == super_type {
            return true;
        }
        self.supertypes
            .get(&sub)
            .map(|set| set.contains(&super_type))
            .unwrap_or(false)
    }

    /// Get all subtypes of a type (not including the type itself).
    pub fn get_subtypes(&self, type_id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.subtypes
            .get(&type_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Get all supertypes of a type (not including the type itself).
    pub fn get_supertypes(&self, type_id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.supertypes
            .get(&type_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }
}
