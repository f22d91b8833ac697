//! HTTP handlers

pub mod health;
pub mod inventory;

pub use health::{health_check, root};
pub use inventory::{
    delete_inventory, edit_inventory, get_inventory, list_inventories, post_inventory,
    sell_inventory, submit_intent,
};
