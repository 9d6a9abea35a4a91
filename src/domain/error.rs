//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent hierarchy violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("cycle detected in hierarchy: {}", path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    #[error("cannot create a consistent method resolution order for {type_name} (conflicting bases: {})", candidates.join(", "))]
    InconsistentHierarchy {
        type_name: String,
        candidates: Vec<String>,
    },

    #[error("unknown type: {0}")]
    UnknownType(String),

    #[error("unknown kind: {0}")]
    UnknownKind(String),

    #[error("unknown parent {parent} declared by {child}")]
    UnknownParent { child: String, parent: String },

    #[error("duplicate name: {0}")]
    DuplicateName(String),

    #[error("duplicate parent {parent} declared by {child}")]
    DuplicateParent { child: String, parent: String },

    #[error("invalid name: {0:?}")]
    InvalidName(String),

    #[error("kind hierarchy has no root")]
    MissingRoot,

    #[error("kind hierarchy has more than one root: {}", roots.join(", "))]
    MultipleRoots { roots: Vec<String> },

    #[error("{type_name} has no member {member}")]
    MemberNotFound { type_name: String, member: String },

    #[error("member {member} of {owner} is private")]
    PrivateMember { owner: String, member: String },

    #[error("{ancestor} is not an ancestor of {type_name}")]
    NotAnAncestor { type_name: String, ancestor: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
