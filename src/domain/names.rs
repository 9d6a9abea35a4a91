//! Identifier validation shared by kind and type declarations.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::error::{DomainError, DomainResult};

fn identifier_regex() -> &'static Regex {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap())
}

/// Check that `name` is a plain identifier (`Error`, `ValueTooSmallError`, `__init__`).
pub fn validate_name(name: &str) -> DomainResult<()> {
    if identifier_regex().is_match(name) {
        Ok(())
    } else {
        Err(DomainError::InvalidName(name.to_string()))
    }
}
