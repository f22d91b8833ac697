//! Domain models for the Inventory Ledger

mod inventory;

pub use inventory::*;
