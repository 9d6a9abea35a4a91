//! Exception-kind dispatch and C3 linearization of declared type hierarchies.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
