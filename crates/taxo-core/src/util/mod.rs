//! Utility modules shared across the workspace.
//!
//! # Modules
//!
//! - [`ids`]: Category name cleanup and schema identifier validation

pub mod ids;
