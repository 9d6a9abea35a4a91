//! Hierarchy service
//!
//! Loads declaration files and answers resolution queries by type and kind name.

use std::path::Path;
use std::sync::Arc;

use termtree::Tree;
use tracing::{debug, instrument, warn};

use crate::application::declarations::Declarations;
use crate::application::dispatch::{DispatchError, HandlerSet, Shadowed};
use crate::application::render::ToTree;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{
    Access, DomainError, KindRegistry, LinearizationTable, MroResolver, TypeGraph, TypeId,
};
use crate::infrastructure::traits::FileSystem;
use crate::util::path::PathExt;

/// Which handler of a simulated `try` block catches a raised kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatchReport {
    pub raised: String,
    /// Handler kinds in registration order
    pub handlers: Vec<String>,
    /// Index into `handlers`, None when the failure propagates
    pub caught_by: Option<usize>,
    pub unreachable: Vec<Shadowed>,
}

/// A validated pair of hierarchies from one declaration file.
///
/// Construction rejects cycles and malformed kind trees; linearization
/// errors surface per query.
#[derive(Debug)]
pub struct Hierarchy {
    graph: TypeGraph,
    kinds: Option<KindRegistry>,
}

impl Hierarchy {
    pub fn from_declarations(decls: &Declarations) -> ApplicationResult<Self> {
        let graph = decls.type_graph()?;
        let kinds = if decls.kinds.is_empty() {
            None
        } else {
            Some(decls.kind_registry()?)
        };
        Ok(Self { graph, kinds })
    }

    pub fn graph(&self) -> &TypeGraph {
        &self.graph
    }

    pub fn kinds(&self) -> ApplicationResult<&KindRegistry> {
        self.kinds
            .as_ref()
            .ok_or_else(|| DomainError::MissingRoot.into())
    }

    fn resolver(&self) -> MroResolver<'_> {
        MroResolver::new(&self.graph)
    }

    fn names(&self, ids: &[TypeId]) -> Vec<String> {
        self.graph.names(ids)
    }

    /// Linearization of `type_name` as type names.
    pub fn mro(&self, type_name: &str) -> ApplicationResult<Vec<String>> {
        let mro = self.resolver().linearize_name(type_name)?;
        Ok(self.names(mro.as_slice()))
    }

    /// Linearization of every type, in declaration order.
    pub fn table(&self) -> ApplicationResult<Vec<(String, Vec<String>)>> {
        let table = LinearizationTable::build(&self.graph)?;
        Ok(table
            .iter()
            .map(|(ty, mro)| (self.graph.name(ty).to_string(), self.names(mro.as_slice())))
            .collect())
    }

    /// `issubclass(type_name, (candidates...))`.
    pub fn is_subclass(&self, type_name: &str, candidates: &[String]) -> ApplicationResult<bool> {
        let ty = self.graph.resolve(type_name)?;
        let candidates = candidates
            .iter()
            .map(|c| self.graph.resolve(c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.resolver().is_subclass_of_any(ty, &candidates)?)
    }

    pub fn resolve_member(
        &self,
        type_name: &str,
        member: &str,
        access: Access,
    ) -> ApplicationResult<String> {
        let ty = self.graph.resolve(type_name)?;
        let owner = self.resolver().resolve_member(ty, member, access)?;
        Ok(self.graph.name(owner).to_string())
    }

    pub fn super_lookup(&self, type_name: &str, after: &str, member: &str) -> ApplicationResult<String> {
        let ty = self.graph.resolve(type_name)?;
        let after = self.graph.resolve(after)?;
        let owner = self.resolver().super_lookup(ty, after, member)?;
        Ok(self.graph.name(owner).to_string())
    }

    /// Types whose `member` bodies finish, in order, when every override calls `super()`.
    pub fn completion_order(&self, type_name: &str, member: &str) -> ApplicationResult<Vec<String>> {
        let ty = self.graph.resolve(type_name)?;
        let chain = self.resolver().completion_order(ty, member)?;
        Ok(self.names(&chain))
    }

    /// Simulate `try: raise <raised> except <handlers>...`.
    #[instrument(level = "debug", skip(self))]
    pub fn catch(&self, raised: &str, handlers: &[String]) -> ApplicationResult<CatchReport> {
        let registry = self.kinds()?;
        let raised_id = registry.resolve(raised)?;

        let mut set: HandlerSet<usize> = HandlerSet::new(registry);
        for (index, name) in handlers.iter().enumerate() {
            set.on_named(name, move |_| Ok(index))?;
        }
        let unreachable = set.unreachable();

        let caught_by = match set.dispatch(|| Err(registry.raise(raised_id, ""))) {
            Ok(index) => Some(index),
            Err(DispatchError::Unhandled(failure)) => {
                debug!("{} propagates", failure);
                None
            }
            Err(e) => return Err(e.into()),
        };

        Ok(CatchReport {
            raised: raised.to_string(),
            handlers: handlers.to_vec(),
            caught_by,
            unreachable,
        })
    }

    /// Type trees followed by the kind tree, if any.
    pub fn trees(&self) -> Vec<Tree<String>> {
        let mut trees = self.graph.to_trees();
        if let Some(kinds) = &self.kinds {
            trees.extend(kinds.to_trees());
        }
        trees
    }
}

/// Service for loading hierarchy declarations.
pub struct HierarchyService {
    fs: Arc<dyn FileSystem>,
}

impl HierarchyService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    pub fn load(&self, path: &Path) -> ApplicationResult<Declarations> {
        debug!("load: path={}", path.display());
        if self.fs.exists(path) && !self.fs.is_file(path) {
            return Err(ApplicationError::Declarations {
                path: path.to_path_buf(),
                message: "not a regular file".to_string(),
            });
        }
        if !path.is_declaration_file() {
            warn!("{} does not have a .toml extension", path.display());
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read declarations", path)?;
        Declarations::parse(&content, path)
    }

    /// Load and validate both hierarchies of a declaration file.
    pub fn open(&self, path: &Path) -> ApplicationResult<Hierarchy> {
        let decls = self.load(path)?;
        Hierarchy::from_declarations(&decls)
    }
}
