//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem)
//! but are themselves concrete structs, not traits.

mod arithmetic;
mod hierarchy;
mod range;

pub use arithmetic::{ArithmeticService, InterestReport};
pub use hierarchy::{CatchReport, Hierarchy, HierarchyService};
pub use range::{Attempt, RangeService, ABOVE_RANGE, BELOW_RANGE, IN_RANGE, NOT_A_NUMBER};
