//! Inventory models
//!
//! Re-exports the domain models from the shared crate

pub use shared::models::*;
pub use shared::types::{InventoryQuery, RemainFilter, DEFAULT_PAGE_SIZE};
