use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// Handle of a type inside its [`TypeGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(Index);

/// A declared type with its ordered direct parents.
#[derive(Debug, Clone)]
pub struct TypeNode {
    pub name: String,
    /// Direct parents in declaration order, empty for root types
    pub parents: Vec<TypeId>,
    /// Attributes and methods declared on this type itself
    pub members: BTreeSet<String>,
    /// Subset of `members` not reachable from outside the type
    pub private: BTreeSet<String>,
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Immutable, acyclic graph of types stored in a generational arena.
///
/// Only [`crate::domain::HierarchyBuilder`] creates graphs, so every graph
/// handed out has resolved parents and no cycles.
#[derive(Debug, Default)]
pub struct TypeGraph {
    arena: Arena<TypeNode>,
    names: BTreeMap<String, TypeId>,
    /// Declaration order
    order: Vec<TypeId>,
}

impl TypeGraph {
    /// Reserve a node; parents are attached later by the builder.
    pub(crate) fn insert(&mut self, name: String) -> TypeId {
        let id = TypeId(self.arena.insert(TypeNode {
            name: name.clone(),
            parents: Vec::new(),
            members: BTreeSet::new(),
            private: BTreeSet::new(),
        }));
        self.names.insert(name, id);
        self.order.push(id);
        id
    }

    pub(crate) fn node_mut(&mut self, id: TypeId) -> Option<&mut TypeNode> {
        self.arena.get_mut(id.0)
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeNode> {
        self.arena.get(id.0)
    }

    /// Node lookup for ids handed out by this graph.
    pub fn node(&self, id: TypeId) -> &TypeNode {
        &self.arena[id.0]
    }

    pub fn name(&self, id: TypeId) -> &str {
        &self.node(id).name
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.names.get(name).copied()
    }

    /// Like [`lookup`](Self::lookup), but unknown names are an error.
    pub fn resolve(&self, name: &str) -> DomainResult<TypeId> {
        self.lookup(name)
            .ok_or_else(|| DomainError::UnknownType(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All types in declaration order.
    pub fn types(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.order.iter().copied()
    }

    pub fn names(&self, ids: &[TypeId]) -> Vec<String> {
        ids.iter().map(|&id| self.name(id).to_string()).collect()
    }

    /// Types without parents, in declaration order.
    #[instrument(level = "trace", skip(self))]
    pub fn roots(&self) -> Vec<TypeId> {
        self.types()
            .filter(|&id| self.node(id).parents.is_empty())
            .collect()
    }

    /// Direct subtypes of `id`, in declaration order.
    #[instrument(level = "trace", skip(self))]
    pub fn children(&self, id: TypeId) -> Vec<TypeId> {
        self.types()
            .filter(|&child| self.node(child).parents.contains(&id))
            .collect()
    }
}
