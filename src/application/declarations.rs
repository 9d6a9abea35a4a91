//! TOML declaration files describing kind and type hierarchies.
//!
//! ```toml
//! [[kinds]]
//! name = "Error"
//! [[kinds]]
//! name = "ValueTooSmallError"
//! parent = "Error"
//!
//! [[types]]
//! name = "B1"
//! parents = ["A1", "B"]
//! members = ["__init__"]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainError, DomainResult, HierarchyBuilder, KindRegistry, TypeDecl, TypeGraph};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KindSpec {
    pub name: String,
    /// Omitted for the root kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypeSpec {
    pub name: String,
    pub parents: Vec<String>,
    pub members: Vec<String>,
    pub private: Vec<String>,
}

impl From<TypeSpec> for TypeDecl {
    fn from(ty: TypeSpec) -> Self {
        TypeDecl {
            name: ty.name,
            parents: ty.parents,
            members: ty.members,
            private: ty.private,
        }
    }
}

/// Parsed content of one declaration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Declarations {
    pub kinds: Vec<KindSpec>,
    pub types: Vec<TypeSpec>,
}

impl Declarations {
    /// Parse declaration file content; `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> ApplicationResult<Self> {
        let decls: Self = toml::from_str(content).map_err(|e| ApplicationError::Declarations {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(
            "parsed {}: {} kinds, {} types",
            path.display(),
            decls.kinds.len(),
            decls.types.len()
        );
        Ok(decls)
    }

    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize declarations: {e}"),
        })
    }

    /// Build and validate the type graph.
    pub fn type_graph(&self) -> DomainResult<TypeGraph> {
        let mut builder = HierarchyBuilder::new();
        for ty in &self.types {
            builder.push(ty.clone().into());
        }
        builder.build()
    }

    /// Build the kind registry; kinds may be listed in any order.
    pub fn kind_registry(&self) -> DomainResult<KindRegistry> {
        let roots: Vec<&KindSpec> = self.kinds.iter().filter(|k| k.parent.is_none()).collect();
        let mut seen = BTreeSet::new();
        for kind in &self.kinds {
            if !seen.insert(kind.name.as_str()) {
                return Err(DomainError::DuplicateName(kind.name.clone()));
            }
        }

        let root = match roots.as_slice() {
            [] => return Err(self.orphan_error(0)),
            [root] => root,
            many => {
                return Err(DomainError::MultipleRoots {
                    roots: many.iter().map(|k| k.name.clone()).collect(),
                })
            }
        };

        let mut registry = KindRegistry::with_root(root.name.clone())?;
        let mut pending: Vec<usize> = (0..self.kinds.len())
            .filter(|&i| self.kinds[i].parent.is_some())
            .collect();

        // Register every kind whose parent is known until nothing moves.
        loop {
            let before = pending.len();
            let mut still_pending = Vec::new();
            for i in pending {
                let kind = &self.kinds[i];
                match kind.parent.as_deref() {
                    Some(parent) if registry.lookup(parent).is_some() => {
                        registry.register(&kind.name, parent)?;
                    }
                    _ => still_pending.push(i),
                }
            }
            pending = still_pending;
            if pending.is_empty() {
                return Ok(registry);
            }
            if pending.len() == before {
                return Err(self.orphan_error(pending[0]));
            }
        }
    }

    /// Explain why the kind at `start` cannot reach the root.
    fn orphan_error(&self, start: usize) -> DomainError {
        let Some(mut current) = self.kinds.get(start) else {
            return DomainError::MissingRoot;
        };
        let by_name: BTreeMap<&str, &KindSpec> =
            self.kinds.iter().map(|k| (k.name.as_str(), k)).collect();
        let mut path: Vec<&str> = Vec::new();

        loop {
            if let Some(pos) = path.iter().position(|&n| n == current.name) {
                let mut cycle: Vec<String> = path[pos..].iter().map(|n| n.to_string()).collect();
                cycle.push(current.name.clone());
                return DomainError::CycleDetected { path: cycle };
            }
            path.push(&current.name);

            let Some(parent) = current.parent.as_deref() else {
                return DomainError::MissingRoot;
            };
            match by_name.get(parent) {
                Some(next) => current = *next,
                None => {
                    return DomainError::UnknownParent {
                        child: current.name.clone(),
                        parent: parent.to_string(),
                    }
                }
            }
        }
    }
}
