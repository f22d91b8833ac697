//! Inventory stores and the gateway that drives them

pub mod gateway;
pub mod memory;
pub mod postgres;
pub mod store;

pub use gateway::InventoryGateway;
pub use memory::InMemoryInventoryStore;
pub use postgres::PgInventoryStore;
pub use store::InventoryStore;
