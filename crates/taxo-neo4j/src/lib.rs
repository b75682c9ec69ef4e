//! # taxo-neo4j
//!
//! Neo4j backend for the taxo taxonomy query contract.
//!
//! [`Neo4jStore`] sends one parameterized Cypher statement per operation
//! over Bolt. Node label and relation type come from [`Neo4jConfig`], so
//! the same store serves `Category`/`IS_PARENT_OF` and
//! `Category`/`SUBCATEGORY` style schemas alike.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
mod error;
pub mod queries;

pub use client::Neo4jStore;
pub use config::Neo4jConfig;
pub use queries::CypherQueries;
