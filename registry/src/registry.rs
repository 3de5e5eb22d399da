//! The Registry - immutable type lookup.

use crate::{AtomKind, CoreTypes, SubtypeIndex, TypeDef};
use std::collections::HashMap;
use weft_core::TypeId;

/// The Registry provides runtime lookup of atom types.
/// It is immutable after construction.
#[derive(Debug)]
pub struct Registry {
    /// Type definitions by ID.
    types: HashMap<TypeId, TypeDef>,
    /// Type ID lookup by name.
    type_names: HashMap<String, TypeId>,
    /// Precomputed subtype relationships.
    subtype_index: SubtypeIndex,
    /// Tags of the standard types.
    core: CoreTypes,
}

impl Registry {
    pub(crate) fn new(
        types: HashMap<TypeId, TypeDef>,
        type_names: HashMap<String, TypeId>,
        subtype_index: SubtypeIndex,
        core: CoreTypes,
    ) -> Self {
        Self {
            types,
            type_names,
            subtype_index,
            core,
        }
    }

    /// A registry holding only the standard types.
    pub fn standard() -> Self {
        // The standard table always resolves.
        match crate::RegistryBuilder::new().build() {
            Ok(registry) => registry,
            Err(e) => unreachable!("standard registry failed to build: {}", e),
        }
    }

    // ==================== Type Lookups ====================

    /// Tags of the standard types.
    pub fn core(&self) -> &CoreTypes {
        &self.core
    }

    /// Get a type definition by name.
    pub fn get_type_by_name(&self, name: &str) -> Option<&TypeDef> {
        self.type_names.get(name).and_then(|id| self.types.get(id))
    }

    /// Get a type definition by ID.
    pub fn get_type(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(&id)
    }

    /// Get a type ID by name.
    pub fn get_type_id(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    /// Get a type name by ID.
    pub fn type_name(&self, id: TypeId) -> Option<&str> {
        self.types.get(&id).map(|def| def.name.as_str())
    }

    /// Node or link, if the type is known and concrete.
    pub fn kind(&self, id: TypeId) -> Option<AtomKind> {
        self.types.get(&id).and_then(|def| def.kind)
    }

    /// Get all type definitions.
    pub fn all_types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    /// Get the number of types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    // ==================== Subtype Queries ====================

    /// Check if `sub` is a subtype of `super_type`.
    pub fn is_subtype(&self, sub: TypeId, super_type: TypeId) -> bool {
        self.subtype_index.is_subtype(sub, super_type)
    }

    /// Get all subtypes of a type (not including the type itself).
    pub fn get_subtypes(&self, type_id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.subtype_index.get_subtypes(type_id)
    }

    /// Get all supertypes of a type (not including the type itself).
    pub fn get_supertypes(&self, type_id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.subtype_index.get_supertypes(type_id)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
