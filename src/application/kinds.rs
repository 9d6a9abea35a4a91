//! Built-in kind hierarchy used by the range and arithmetic services.
//!
//! ```text
//! Exception
//! ├── ArithmeticError
//! │   └── ZeroDivisionError
//! ├── ValueError
//! └── Error
//!     ├── ValueTooSmallError
//!     └── ValueTooLargeError
//! ```

use crate::domain::{DomainResult, KindRegistry};

pub const EXCEPTION: &str = "Exception";
pub const ARITHMETIC_ERROR: &str = "ArithmeticError";
pub const ZERO_DIVISION_ERROR: &str = "ZeroDivisionError";
pub const VALUE_ERROR: &str = "ValueError";
/// Base of the user-defined range errors
pub const ERROR: &str = "Error";
pub const VALUE_TOO_SMALL_ERROR: &str = "ValueTooSmallError";
pub const VALUE_TOO_LARGE_ERROR: &str = "ValueTooLargeError";

pub fn standard_kinds() -> DomainResult<KindRegistry> {
    let mut registry = KindRegistry::with_root(EXCEPTION)?;
    registry.register(ARITHMETIC_ERROR, EXCEPTION)?;
    registry.register(ZERO_DIVISION_ERROR, ARITHMETIC_ERROR)?;
    registry.register(VALUE_ERROR, EXCEPTION)?;
    registry.register(ERROR, EXCEPTION)?;
    registry.register(VALUE_TOO_SMALL_ERROR, ERROR)?;
    registry.register(VALUE_TOO_LARGE_ERROR, ERROR)?;
    Ok(registry)
}
