//! Storage contract shared by every inventory backend

use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    InventoryCollection, InventoryEdit, InventoryItem, InventoryQuery, NewInventoryItem, Sale,
};
use uuid::Uuid;

use crate::error::AppResult;

/// Holds inventory lots and answers queries over them.
///
/// Implementations must:
/// - return items in insertion order
/// - compute totals over every item matching the query, not only the page
/// - leave a lot untouched when a mutation is rejected
/// - make every successful mutation visible to the next query
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Filtered, searched and paginated view plus totals
    async fn query(&self, query: &InventoryQuery) -> AppResult<InventoryCollection>;

    /// Look up a single item
    async fn get(&self, id: Uuid) -> AppResult<InventoryItem>;

    /// Insert a new lot with nothing sold
    async fn add(&self, item: NewInventoryItem) -> AppResult<InventoryItem>;

    /// Record units sold at a unit price
    async fn sell(&self, sale: Sale) -> AppResult<InventoryItem>;

    /// Replace purchase details
    async fn edit(&self, edit: InventoryEdit) -> AppResult<InventoryItem>;

    /// Hard delete
    async fn remove(&self, id: Uuid) -> AppResult<()>;

    /// Short name reported by the health endpoint
    fn backend_name(&self) -> &'static str;
}

#[async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn query(&self, query: &InventoryQuery) -> AppResult<InventoryCollection> {
        (**self).query(query).await
    }

    async fn get(&self, id: Uuid) -> AppResult<InventoryItem> {
        (**self).get(id).await
    }

    async fn add(&self, item: NewInventoryItem) -> AppResult<InventoryItem> {
        (**self).add(item).await
    }

    async fn sell(&self, sale: Sale) -> AppResult<InventoryItem> {
        (**self).sell(sale).await
    }

    async fn edit(&self, edit: InventoryEdit) -> AppResult<InventoryItem> {
        (**self).edit(edit).await
    }

    async fn remove(&self, id: Uuid) -> AppResult<()> {
        (**self).remove(id).await
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}
