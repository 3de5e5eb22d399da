//! Variable declarations and type restrictions.

use crate::{AtomStore, PatternError, PatternResult};
use std::collections::{BTreeSet, HashMap};
use tracing::warn;
use weft_core::{AtomId, TypeId};

/// The variables of one pattern, ordered by atom id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSet {
    vars: BTreeSet<AtomId>,
}

impl VariableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, var: AtomId) -> bool {
        self.vars.insert(var)
    }

    pub fn contains(&self, var: AtomId) -> bool {
        self.vars.contains(&var)
    }

    pub fn iter(&self) -> impl Iterator<Item = AtomId> + '_ {
        self.vars.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl FromIterator<AtomId> for VariableSet {
    fn from_iter<I: IntoIterator<Item = AtomId>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

/// Allowed ground types per variable. Unrestricted variables are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRestrictions {
    map: HashMap<AtomId, BTreeSet<TypeId>>,
}

impl TypeRestrictions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict a variable; repeated restrictions are united.
    pub fn restrict(&mut self, var: AtomId, types: impl IntoIterator<Item = TypeId>) {
        self.map.entry(var).or_default().extend(types);
    }

    pub fn allowed(&self, var: AtomId) -> Option<&BTreeSet<TypeId>> {
        self.map.get(&var)
    }

    /// Whether a ground of `ground_type` may bind `var`. Subtypes of an
    /// allowed type are allowed.
    pub fn permits(&self, store: &dyn AtomStore, var: AtomId, ground_type: TypeId) -> bool {
        match self.map.get(&var) {
            Some(allowed) => allowed.iter().any(|t| store.is_subtype(ground_type, *t)),
            None => true,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// The resolved form of a variable-declaration term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableDeclarations {
    pub variables: VariableSet,
    pub restrictions: TypeRestrictions,
}

/// Whether the atom is a variable: a `VariableNode` or a subtype of it.
pub fn is_variable(store: &dyn AtomStore, atom: AtomId) -> bool {
    let variable_node = store.core().variable_node;
    store
        .type_of(atom)
        .map_or(false, |t| store.is_subtype(t, variable_node))
}

/// Parse a declaration: a bare variable, a `TypedVariableLink`, or a
/// `ListLink` of either.
pub fn resolve_declarations(
    store: &dyn AtomStore,
    decls: AtomId,
) -> PatternResult<VariableDeclarations> {
    let mut out = VariableDeclarations::default();
    let core = *store.core();
    let decl_type = store.type_of(decls)?;

    if is_variable(store, decls) {
        out.variables.insert(decls);
    } else if decl_type == core.typed_variable_link {
        resolve_typed(store, decls, &mut out)?;
    } else if decl_type == core.list_link {
        for &child in store.outgoing_set(decls)? {
            if is_variable(store, child) {
                out.variables.insert(child);
            } else if store.type_of(child)? == core.typed_variable_link {
                resolve_typed(store, child, &mut out)?;
            } else {
                return Err(reject(PatternError::structural(
                    "a variable or TypedVariableLink",
                    store.type_name_of(child),
                )));
            }
        }
    } else {
        return Err(reject(PatternError::structural(
            "a variable, TypedVariableLink or ListLink",
            store.type_name(decl_type),
        )));
    }

    Ok(out)
}

fn resolve_typed(
    store: &dyn AtomStore,
    typed: AtomId,
    out: &mut VariableDeclarations,
) -> PatternResult<()> {
    let core = *store.core();
    let children = store.outgoing_set(typed)?;
    if children.len() != 2 {
        return Err(reject(PatternError::wrong_arity(
            "TypedVariableLink",
            2,
            children.len(),
        )));
    }
    let (var, type_spec) = (children[0], children[1]);

    if !is_variable(store, var) {
        return Err(reject(PatternError::structural(
            "a variable",
            store.type_name_of(var),
        )));
    }

    let mut types = Vec::new();
    let spec_type = store.type_of(type_spec)?;
    if spec_type == core.variable_type_node {
        types.push(resolve_type_node(store, type_spec)?);
    } else if spec_type == core.list_link {
        for &member in store.outgoing_set(type_spec)? {
            if store.type_of(member)? != core.variable_type_node {
                return Err(reject(PatternError::structural(
                    "VariableTypeNode",
                    store.type_name_of(member),
                )));
            }
            types.push(resolve_type_node(store, member)?);
        }
    } else {
        return Err(reject(PatternError::structural(
            "VariableTypeNode or ListLink",
            store.type_name(spec_type),
        )));
    }

    out.variables.insert(var);
    out.restrictions.restrict(var, types);
    Ok(())
}

fn resolve_type_node(store: &dyn AtomStore, type_node: AtomId) -> PatternResult<TypeId> {
    let name = store.name(type_node).unwrap_or_default();
    store
        .type_name_to_tag(name)
        .ok_or_else(|| reject(PatternError::unknown_type(name)))
}

fn reject(err: PatternError) -> PatternError {
    warn!(error = %err, "rejected variable declaration");
    err
}

/// Every variable occurring anywhere inside `term`.
pub fn find_variables(store: &dyn AtomStore, term: AtomId) -> PatternResult<VariableSet> {
    let mut found = VariableSet::new();
    let mut stack = vec![term];
    while let Some(atom) = stack.pop() {
        if is_variable(store, atom) {
            found.insert(atom);
        } else {
            stack.extend_from_slice(store.outgoing_set(atom)?);
        }
    }
    Ok(found)
}
