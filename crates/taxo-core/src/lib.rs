//! Taxo Core: shared errors and utilities.
//!
//! This crate provides the foundational types used across all taxo crates.
//! It has no internal taxo dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`util`]: Name and identifier utilities

pub mod error;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};

// Convenience re-exports from util
pub use util::ids::{clean_name, is_identifier, validate_identifier};
