//! Route definitions for the Inventory Ledger

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/inventories", inventory_routes())
}

/// Inventory routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_inventories)
                .post(handlers::post_inventory)
                .put(handlers::sell_inventory)
                .patch(handlers::edit_inventory)
                .delete(handlers::delete_inventory),
        )
        .route("/submit", post(handlers::submit_intent))
        .route("/:id", get(handlers::get_inventory))
}
