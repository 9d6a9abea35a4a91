//! Application layer: dispatch, declaration files and services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod declarations;
pub mod dispatch;
pub mod error;
pub mod error_ext;
pub mod kinds;
pub mod render;
pub mod services;

pub use declarations::{Declarations, KindSpec, TypeSpec};
pub use dispatch::{dispatch, DispatchError, Handler, HandlerSet, Shadowed};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use render::ToTree;
