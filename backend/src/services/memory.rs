//! In-process inventory store

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use shared::{
    validate_query, InventoryCollection, InventoryEdit, InventoryItem, InventoryLot,
    InventoryQuery, NewInventoryItem, Sale,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::store::InventoryStore;

/// Lots kept in a vector in insertion order behind a reader/writer lock.
///
/// Every mutation validates against the current lot while holding the write
/// lock, so concurrent sales on one lot cannot oversell it.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    lots: RwLock<Vec<InventoryLot>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing lots, kept in the given order
    pub fn with_lots(lots: Vec<InventoryLot>) -> Self {
        Self {
            lots: RwLock::new(lots),
        }
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Vec<InventoryLot>>> {
        self.lots
            .read()
            .map_err(|_| AppError::Internal("inventory lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Vec<InventoryLot>>> {
        self.lots
            .write()
            .map_err(|_| AppError::Internal("inventory lock poisoned".to_string()))
    }
}

fn find_mut(lots: &mut [InventoryLot], id: Uuid) -> AppResult<&mut InventoryLot> {
    lots.iter_mut()
        .find(|lot| lot.id == id)
        .ok_or_else(|| AppError::item_not_found(id))
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn query(&self, query: &InventoryQuery) -> AppResult<InventoryCollection> {
        validate_query(query)?;
        let lots = self.read()?;
        Ok(InventoryCollection::assemble(lots.iter(), query)?)
    }

    async fn get(&self, id: Uuid) -> AppResult<InventoryItem> {
        let lots = self.read()?;
        let lot = lots
            .iter()
            .find(|lot| lot.id == id)
            .ok_or_else(|| AppError::item_not_found(id))?;
        Ok(lot.to_item()?)
    }

    async fn add(&self, item: NewInventoryItem) -> AppResult<InventoryItem> {
        let lot = item.into_lot(Uuid::new_v4(), Utc::now())?;
        let created = lot.to_item()?;
        self.write()?.push(lot);

        tracing::info!(id = %created.id, purchase_order = %created.purchase_order, "Inventory item added");
        Ok(created)
    }

    async fn sell(&self, sale: Sale) -> AppResult<InventoryItem> {
        let mut lots = self.write()?;
        let lot = find_mut(&mut lots, sale.id)?;
        lot.apply_sale(&sale, Utc::now())?;

        tracing::info!(
            id = %lot.id,
            sold = sale.sale_quantities,
            remain = lot.remain_quantities(),
            "Inventory item sold"
        );
        Ok(lot.to_item()?)
    }

    async fn edit(&self, edit: InventoryEdit) -> AppResult<InventoryItem> {
        let mut lots = self.write()?;
        let lot = find_mut(&mut lots, edit.id)?;
        lot.apply_edit(&edit, Utc::now())?;

        tracing::info!(id = %lot.id, "Inventory item edited");
        Ok(lot.to_item()?)
    }

    async fn remove(&self, id: Uuid) -> AppResult<()> {
        let mut lots = self.write()?;
        let position = lots
            .iter()
            .position(|lot| lot.id == id)
            .ok_or_else(|| AppError::item_not_found(id))?;
        lots.remove(position);

        tracing::info!(id = %id, "Inventory item deleted");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
