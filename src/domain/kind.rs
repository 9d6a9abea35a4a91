//! Exception kinds: a single-rooted tree of failure categories.

use std::collections::BTreeMap;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::failure::Failure;
use crate::domain::names::validate_name;

/// Handle of a kind inside its [`KindRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindId(Index);

#[derive(Debug, Clone)]
pub struct ExceptionKind {
    pub name: String,
    /// None only for the root kind
    pub parent: Option<KindId>,
}

/// Registry of exception kinds.
///
/// The root is created with the registry and every later kind names an
/// already registered parent, so the parent relation is always a tree.
#[derive(Debug)]
pub struct KindRegistry {
    arena: Arena<ExceptionKind>,
    names: BTreeMap<String, KindId>,
    order: Vec<KindId>,
    root: KindId,
}

impl KindRegistry {
    pub fn with_root(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        let mut arena = Arena::new();
        let root = KindId(arena.insert(ExceptionKind {
            name: name.clone(),
            parent: None,
        }));
        Ok(Self {
            arena,
            names: BTreeMap::from([(name, root)]),
            order: vec![root],
            root,
        })
    }

    /// Register `name` as a direct child of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn register(&mut self, name: &str, parent: &str) -> DomainResult<KindId> {
        validate_name(name)?;
        if self.names.contains_key(name) {
            return Err(DomainError::DuplicateName(name.to_string()));
        }
        let parent_id = self
            .lookup(parent)
            .ok_or_else(|| DomainError::UnknownParent {
                child: name.to_string(),
                parent: parent.to_string(),
            })?;

        let id = KindId(self.arena.insert(ExceptionKind {
            name: name.to_string(),
            parent: Some(parent_id),
        }));
        self.names.insert(name.to_string(), id);
        self.order.push(id);
        Ok(id)
    }

    pub fn root(&self) -> KindId {
        self.root
    }

    pub fn get(&self, id: KindId) -> Option<&ExceptionKind> {
        self.arena.get(id.0)
    }

    pub fn name(&self, id: KindId) -> &str {
        &self.arena[id.0].name
    }

    pub fn lookup(&self, name: &str) -> Option<KindId> {
        self.names.get(name).copied()
    }

    pub fn resolve(&self, name: &str) -> DomainResult<KindId> {
        self.lookup(name)
            .ok_or_else(|| DomainError::UnknownKind(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All kinds in registration order, root first.
    pub fn kinds(&self) -> impl Iterator<Item = KindId> + '_ {
        self.order.iter().copied()
    }

    /// Direct children of `id`, in registration order.
    pub fn children(&self, id: KindId) -> Vec<KindId> {
        self.kinds()
            .filter(|&k| self.arena[k.0].parent == Some(id))
            .collect()
    }

    /// Chain from `id` up to the root, `id` first.
    pub fn ancestors(&self, id: KindId) -> Vec<KindId> {
        std::iter::successors(Some(id), |k| self.get(*k).and_then(|kind| kind.parent)).collect()
    }

    /// Ancestor matching: `handler` catches `raised` if it is the same kind
    /// or lies on the ancestor chain of `raised`.
    pub fn matches(&self, handler: KindId, raised: KindId) -> bool {
        let hit = self.ancestors(raised).contains(&handler);
        trace!(
            "{} catches {}: {}",
            self.name(handler),
            self.name(raised),
            hit
        );
        hit
    }

    /// Create a failure of kind `id`.
    pub fn raise(&self, id: KindId, message: impl Into<String>) -> Failure {
        Failure::new(id, self.name(id), message)
    }

    /// Create a failure by kind name.
    pub fn raise_named(&self, name: &str, message: impl Into<String>) -> DomainResult<Failure> {
        Ok(self.raise(self.resolve(name)?, message))
    }
}
