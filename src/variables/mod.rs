//! Variables module.
//!
//! Builds the per-block substitution table from `$global` and `:local`
//! declarations and rewrites placeholders in request text.

pub mod substitution;

pub use substitution::{parse_declaration, resolve, substitute, Scope, VariableTable};
