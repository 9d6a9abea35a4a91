//! Hierarchy builder: collects type declarations and validates them into a [`TypeGraph`].

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::hierarchy::{TypeGraph, TypeId};
use crate::domain::names::validate_name;

/// A type declaration as written by the user, parents still unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub parents: Vec<String>,
    pub members: Vec<String>,
    pub private: Vec<String>,
}

/// Constructs type graphs from declarations.
///
/// Declarations may reference parents declared later; names are resolved
/// and cycles rejected in [`build`](Self::build), so an invalid hierarchy
/// never reaches linearization.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    decls: Vec<TypeDecl>,
}

/// Fluent access to the declaration just added.
pub struct TypeDeclBuilder<'a> {
    decl: &'a mut TypeDecl,
}

impl TypeDeclBuilder<'_> {
    /// Declare a public member (attribute or method) on this type.
    pub fn member(self, name: impl Into<String>) -> Self {
        self.decl.members.push(name.into());
        self
    }

    /// Declare a member only visible from inside the type.
    pub fn private_member(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.decl.members.push(name.clone());
        self.decl.private.push(name);
        self
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InProgress,
    Done,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a type with its direct parents in precedence order.
    pub fn declare<I, S>(&mut self, name: impl Into<String>, parents: I) -> TypeDeclBuilder<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.decls.push(TypeDecl {
            name: name.into(),
            parents: parents.into_iter().map(Into::into).collect(),
            ..TypeDecl::default()
        });
        let last = self.decls.len() - 1;
        TypeDeclBuilder {
            decl: &mut self.decls[last],
        }
    }

    /// Add an already assembled declaration.
    pub fn push(&mut self, decl: TypeDecl) {
        self.decls.push(decl);
    }

    /// Validate all declarations and freeze them into a graph.
    #[instrument(level = "debug", skip(self), fields(types = self.decls.len()))]
    pub fn build(self) -> DomainResult<TypeGraph> {
        let edges = {
            let index = self.index_names()?;
            self.resolve_parents(&index)?
        };
        self.check_acyclic(&edges)?;

        let mut graph = TypeGraph::default();
        let ids: Vec<TypeId> = self
            .decls
            .iter()
            .map(|decl| graph.insert(decl.name.clone()))
            .collect();

        for (decl, (id, parents)) in self.decls.into_iter().zip(ids.iter().zip(edges)) {
            if let Some(node) = graph.node_mut(*id) {
                node.parents = parents.into_iter().map(|p| ids[p]).collect();
                node.members = decl
                    .members
                    .into_iter()
                    .chain(decl.private.iter().cloned())
                    .collect();
                node.private = decl.private.into_iter().collect();
            }
        }

        debug!("built type graph with {} types", graph.len());
        Ok(graph)
    }

    fn index_names(&self) -> DomainResult<BTreeMap<&str, usize>> {
        let mut index = BTreeMap::new();
        for (i, decl) in self.decls.iter().enumerate() {
            validate_name(&decl.name)?;
            for member in decl.members.iter().chain(&decl.private) {
                validate_name(member)?;
            }
            if index.insert(decl.name.as_str(), i).is_some() {
                return Err(DomainError::DuplicateName(decl.name.clone()));
            }
        }
        Ok(index)
    }

    fn resolve_parents(&self, index: &BTreeMap<&str, usize>) -> DomainResult<Vec<Vec<usize>>> {
        self.decls
            .iter()
            .map(|decl| -> DomainResult<Vec<usize>> {
                let mut seen = BTreeSet::new();
                decl.parents
                    .iter()
                    .map(|parent| {
                        let &p = index.get(parent.as_str()).ok_or_else(|| {
                            DomainError::UnknownParent {
                                child: decl.name.clone(),
                                parent: parent.clone(),
                            }
                        })?;
                        if !seen.insert(p) {
                            return Err(DomainError::DuplicateParent {
                                child: decl.name.clone(),
                                parent: parent.clone(),
                            });
                        }
                        Ok(p)
                    })
                    .collect()
            })
            .collect()
    }

    /// Depth-first search over parent edges in declaration order.
    fn check_acyclic(&self, edges: &[Vec<usize>]) -> DomainResult<()> {
        let mut state = vec![Visit::Unvisited; edges.len()];
        let mut path = Vec::new();
        for start in 0..edges.len() {
            if state[start] == Visit::Unvisited {
                if let Err(cycle) = visit(start, edges, &mut state, &mut path) {
                    let path = cycle
                        .into_iter()
                        .map(|i| self.decls[i].name.clone())
                        .collect();
                    return Err(DomainError::CycleDetected { path });
                }
            }
        }
        Ok(())
    }
}

fn visit(
    node: usize,
    edges: &[Vec<usize>],
    state: &mut [Visit],
    path: &mut Vec<usize>,
) -> Result<(), Vec<usize>> {
    state[node] = Visit::InProgress;
    path.push(node);
    for &parent in &edges[node] {
        match state[parent] {
            Visit::InProgress => {
                let start = path.iter().position(|&n| n == parent).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(parent);
                return Err(cycle);
            }
            Visit::Unvisited => visit(parent, edges, state, path)?,
            Visit::Done => {}
        }
    }
    path.pop();
    state[node] = Visit::Done;
    Ok(())
}
