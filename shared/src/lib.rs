//! Shared types and models for the Inventory Ledger
//!
//! This crate contains the inventory domain (lots, derived figures, query
//! matching and aggregation) shared between the server, the remote store
//! client, and any other consumer of the inventory wire contract.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
