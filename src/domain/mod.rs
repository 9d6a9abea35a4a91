//! Domain layer: hierarchies and the algorithms over them
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod error;
pub mod failure;
pub mod hierarchy;
pub mod kind;
pub mod linearize;
pub mod members;
pub mod names;

pub use builder::{HierarchyBuilder, TypeDecl, TypeDeclBuilder};
pub use error::{DomainError, DomainResult};
pub use failure::Failure;
pub use hierarchy::{TypeGraph, TypeId, TypeNode};
pub use kind::{ExceptionKind, KindId, KindRegistry};
pub use linearize::{c3_merge, Linearization, LinearizationTable, MroResolver};
pub use members::Access;
