//! RegistryBuilder for constructing an immutable Registry.

use crate::{AtomKind, CoreTypes, Registry, SubtypeIndex, TypeDef, STANDARD_TYPES};
use std::collections::HashMap;
use thiserror::Error;
use weft_core::TypeId;

/// Errors that can occur during registry construction.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate type name: {0}")]
    DuplicateTypeName(String),

    #[error("Unknown parent type: {0}")]
    UnknownParentType(String),

    #[error("Type {0} has no Node or Link ancestor")]
    MissingKind(String),

    #[error("Type {0} inherits from both Node and Link")]
    MixedKind(String),

    #[error("Standard type missing from registry: {0}")]
    MissingStandardType(String),
}

/// Builder for constructing an immutable Registry.
///
/// A new builder already holds the standard atom types; custom types are
/// added on top of them.
#[derive(Debug)]
pub struct RegistryBuilder {
    /// Next type ID to allocate.
    next_type_id: u32,
    /// Types being built.
    types: HashMap<TypeId, TypeDef>,
    /// Type name to ID mapping.
    type_names: HashMap<String, TypeId>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Create a new builder seeded with the standard types.
    pub fn new() -> Self {
        let mut builder = Self {
            next_type_id: 0,
            types: HashMap::new(),
            type_names: HashMap::new(),
        };
        builder.insert_root("Atom", None);
        let atom = TypeId::new(0);
        builder.insert_root("Node", Some(AtomKind::Node)).parent_ids = vec![atom];
        builder.insert_root("Link", Some(AtomKind::Link)).parent_ids = vec![atom];

        for (name, parent) in STANDARD_TYPES {
            // Standard names are unique and their parents precede them.
            let parent_id = builder.type_names[*parent];
            let kind = builder.types[&parent_id].kind;
            let id = builder.alloc_id();
            let mut def = TypeDef::new(id, *name, kind);
            def.parent_ids.push(parent_id);
            builder.type_names.insert((*name).to_string(), id);
            builder.types.insert(id, def);
        }

        builder
    }

    fn alloc_id(&mut self) -> TypeId {
        let id = TypeId::new(self.next_type_id);
        self.next_type_id += 1;
        id
    }

    fn insert_root(&mut self, name: &str, kind: Option<AtomKind>) -> &mut TypeDef {
        let id = self.alloc_id();
        self.type_names.insert(name.to_string(), id);
        self.types
            .entry(id)
            .or_insert_with(|| TypeDef::new(id, name, kind))
    }

    /// Add a type definition.
    pub fn add_type(&mut self, name: impl Into<String>) -> TypeBuilder<'_> {
        TypeBuilder {
            builder: self,
            name: name.into(),
            parent_names: Vec::new(),
        }
    }

    /// Build the immutable Registry.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let core = CoreTypes::resolve(&self.type_names).ok_or_else(|| {
            let missing = std::iter::once("Atom")
                .chain(["Node", "Link"])
                .chain(STANDARD_TYPES.iter().map(|(name, _)| *name))
                .find(|name| !self.type_names.contains_key(*name))
                .unwrap_or("Atom");
            RegistryError::MissingStandardType(missing.to_string())
        })?;

        let subtype_index = SubtypeIndex::build(&self.types);

        Ok(Registry::new(
            self.types,
            self.type_names,
            subtype_index,
            core,
        ))
    }
}

/// Builder for a type definition.
pub struct TypeBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    name: String,
    parent_names: Vec<String>,
}

impl<'a> TypeBuilder<'a> {
    /// Add a parent type by name.
    pub fn extends(mut self, parent_name: impl Into<String>) -> Self {
        self.parent_names.push(parent_name.into());
        self
    }

    /// Finish building this type.
    pub fn done(self) -> Result<TypeId, RegistryError> {
        if self.builder.type_names.contains_key(&self.name) {
            return Err(RegistryError::DuplicateTypeName(self.name));
        }

        // Resolve parent IDs; the kind is inherited from the parents
        let mut parent_ids = Vec::new();
        let mut kind = None;
        for parent_name in &self.parent_names {
            let parent_id = match self.builder.type_names.get(parent_name) {
                Some(&parent_id) => parent_id,
                None => return Err(RegistryError::UnknownParentType(parent_name.clone())),
            };
            let parent_kind = self.builder.types.get(&parent_id).and_then(|d| d.kind);
            match (kind, parent_kind) {
                (Some(k), Some(p)) if k != p => {
                    return Err(RegistryError::MixedKind(self.name));
                }
                (None, Some(p)) => kind = Some(p),
                _ => {}
            }
            parent_ids.push(parent_id);
        }

        if kind.is_none() {
            return Err(RegistryError::MissingKind(self.name));
        }

        let id = self.builder.alloc_id();
        let mut type_def = TypeDef::new(id, self.name.clone(), kind);
        type_def.parent_ids = parent_ids;

        self.builder.type_names.insert(self.name, id);
        self.builder.types.insert(id, type_def);

        Ok(id)
    }
}
