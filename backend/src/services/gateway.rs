//! Query/command gateway over an inventory store
//!
//! Each intent runs exactly one store operation and then re-runs the caller's
//! query, so the caller always receives the canonical page and totals. A
//! failed command returns its error as-is and skips the refetch.

use shared::{
    InventoryCollection, InventoryEdit, InventoryIntent, InventoryQuery, NewInventoryItem, Sale,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::store::InventoryStore;

#[derive(Clone)]
pub struct InventoryGateway<S> {
    store: S,
}

impl<S> InventoryGateway<S>
where
    S: InventoryStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn fetch(&self, query: &InventoryQuery) -> AppResult<InventoryCollection> {
        self.store.query(query).await
    }

    pub async fn add(
        &self,
        item: NewInventoryItem,
        query: &InventoryQuery,
    ) -> AppResult<InventoryCollection> {
        self.store.add(item).await?;
        self.store.query(query).await
    }

    pub async fn sell(&self, sale: Sale, query: &InventoryQuery) -> AppResult<InventoryCollection> {
        self.store.sell(sale).await?;
        self.store.query(query).await
    }

    pub async fn edit(
        &self,
        edit: InventoryEdit,
        query: &InventoryQuery,
    ) -> AppResult<InventoryCollection> {
        self.store.edit(edit).await?;
        self.store.query(query).await
    }

    pub async fn delete(&self, id: Uuid, query: &InventoryQuery) -> AppResult<InventoryCollection> {
        self.store.remove(id).await?;
        self.store.query(query).await
    }

    /// Dispatch one intent
    pub async fn submit(
        &self,
        intent: InventoryIntent,
        query: &InventoryQuery,
    ) -> AppResult<InventoryCollection> {
        tracing::debug!(intent = intent.name(), "Submitting inventory intent");

        match intent {
            InventoryIntent::Fetch => self.fetch(query).await,
            InventoryIntent::Add { item } => self.add(item, query).await,
            InventoryIntent::Sell { sale } => self.sell(sale, query).await,
            InventoryIntent::Edit { edit } => self.edit(edit, query).await,
            InventoryIntent::Delete { id } => self.delete(id, query).await,
        }
    }
}
