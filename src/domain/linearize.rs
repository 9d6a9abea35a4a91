//! C3 linearization (method resolution order) over a [`TypeGraph`].
//!
//! The linearization of a type is the type itself followed by the merge of
//! its parents' linearizations and its own parent list. The merge repeatedly
//! takes the first head that does not occur in the tail of any other
//! sequence. When no such head exists the declared hierarchy has conflicting
//! precedence and resolution fails for that type.

use std::collections::HashMap;
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::hierarchy::{TypeGraph, TypeId};

/// Resolved ancestor order of a type, the type itself first.
///
/// Immutable once produced; clones share the same buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linearization(Arc<[TypeId]>);

impl Linearization {
    pub fn as_slice(&self) -> &[TypeId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The type this linearization belongs to.
    pub fn head(&self) -> Option<TypeId> {
        self.0.first().copied()
    }

    pub fn contains(&self, ty: TypeId) -> bool {
        self.0.contains(&ty)
    }

    pub fn position(&self, ty: TypeId) -> Option<usize> {
        self.0.iter().position(|&t| t == ty)
    }

    /// Everything strictly after `ty`, the search space of `super(ty, ..)`.
    pub fn after(&self, ty: TypeId) -> Option<&[TypeId]> {
        self.position(ty).map(|i| &self.0[i + 1..])
    }
}

/// Merge step of C3.
///
/// Returns the merged order, or the heads left over when no head is free of
/// every tail.
pub fn c3_merge(sequences: Vec<&[TypeId]>) -> Result<Vec<TypeId>, Vec<TypeId>> {
    let mut remaining: Vec<&[TypeId]> = sequences.into_iter().filter(|s| !s.is_empty()).collect();
    let mut merged = Vec::new();

    while !remaining.is_empty() {
        let head = remaining
            .iter()
            .map(|seq| seq[0])
            .find(|candidate| remaining.iter().all(|seq| !seq[1..].contains(candidate)));

        let Some(head) = head else {
            return Err(remaining.iter().map(|seq| seq[0]).unique().collect());
        };

        merged.push(head);
        for seq in remaining.iter_mut() {
            let current: &[TypeId] = *seq;
            if current[0] == head {
                *seq = &current[1..];
            }
        }
        remaining.retain(|seq| !seq.is_empty());
    }

    Ok(merged)
}

/// Memoizing linearizer bound to one graph.
///
/// The graph is immutable, so a cached result stays valid for the lifetime
/// of the resolver.
#[derive(Debug)]
pub struct MroResolver<'g> {
    graph: &'g TypeGraph,
    cache: HashMap<TypeId, Linearization>,
}

impl<'g> MroResolver<'g> {
    pub fn new(graph: &'g TypeGraph) -> Self {
        Self {
            graph,
            cache: HashMap::new(),
        }
    }

    pub fn graph(&self) -> &'g TypeGraph {
        self.graph
    }

    /// Linearize `ty`, recursing into (and caching) every ancestor.
    #[instrument(level = "trace", skip(self))]
    pub fn linearize(&mut self, ty: TypeId) -> DomainResult<Linearization> {
        if let Some(hit) = self.cache.get(&ty) {
            return Ok(hit.clone());
        }

        let graph = self.graph;
        let node = graph
            .get(ty)
            .ok_or_else(|| DomainError::UnknownType(format!("{ty:?}")))?;

        let parent_orders = node
            .parents
            .iter()
            .map(|&parent| self.linearize(parent))
            .collect::<DomainResult<Vec<_>>>()?;

        let mut sequences: Vec<&[TypeId]> =
            parent_orders.iter().map(Linearization::as_slice).collect();
        sequences.push(&node.parents);

        let merged = c3_merge(sequences).map_err(|conflict| DomainError::InconsistentHierarchy {
            type_name: node.name.clone(),
            candidates: graph.names(&conflict),
        })?;

        let mut order = Vec::with_capacity(merged.len() + 1);
        order.push(ty);
        order.extend(merged);
        let linearization = Linearization(order.into());

        debug!(
            "mro({}) = [{}]",
            node.name,
            linearization.iter().map(|t| graph.name(t)).join(", ")
        );
        self.cache.insert(ty, linearization.clone());
        Ok(linearization)
    }

    pub fn linearize_name(&mut self, name: &str) -> DomainResult<Linearization> {
        let ty = self.graph.resolve(name)?;
        self.linearize(ty)
    }

    /// `issubclass(ty, ancestor)`: every type is a subclass of itself.
    pub fn is_subclass(&mut self, ty: TypeId, ancestor: TypeId) -> DomainResult<bool> {
        Ok(self.linearize(ty)?.contains(ancestor))
    }

    /// Tuple form of `issubclass`: true if any candidate is an ancestor.
    pub fn is_subclass_of_any(&mut self, ty: TypeId, candidates: &[TypeId]) -> DomainResult<bool> {
        let mro = self.linearize(ty)?;
        Ok(candidates.iter().any(|&c| mro.contains(c)))
    }

    pub(crate) fn into_cache(self) -> HashMap<TypeId, Linearization> {
        self.cache
    }
}

/// Linearizations of every type of a graph, computed up front.
#[derive(Debug)]
pub struct LinearizationTable {
    order: Vec<TypeId>,
    entries: HashMap<TypeId, Linearization>,
}

impl LinearizationTable {
    /// Linearize all types in declaration order; the first inconsistency aborts.
    #[instrument(level = "debug", skip(graph), fields(types = graph.len()))]
    pub fn build(graph: &TypeGraph) -> DomainResult<Self> {
        let mut resolver = MroResolver::new(graph);
        for ty in graph.types() {
            resolver.linearize(ty)?;
        }
        Ok(Self {
            order: graph.types().collect(),
            entries: resolver.into_cache(),
        })
    }

    pub fn get(&self, ty: TypeId) -> Option<&Linearization> {
        self.entries.get(&ty)
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Linearization)> + '_ {
        self.order
            .iter()
            .filter_map(|ty| self.entries.get(ty).map(|lin| (*ty, lin)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
