//! PostgreSQL inventory store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{
    validate_query, InventoryCollection, InventoryEdit, InventoryItem, InventoryLot,
    InventoryQuery, NewInventoryItem, RemainFilter, Sale,
};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::store::InventoryStore;

const LOT_COLUMNS: &str = "id, purchase_order, product, size, purchase_quantities, \
     purchase_cost, price, sale_quantities, created_at, updated_at";

/// Inventory store backed by the `inventory_items` table.
///
/// Sales and edits lock the row with `SELECT ... FOR UPDATE` inside a
/// transaction, so concurrent writers on one lot serialize.
#[derive(Clone)]
pub struct PgInventoryStore {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct LotRow {
    id: Uuid,
    purchase_order: String,
    product: String,
    size: String,
    purchase_quantities: i64,
    purchase_cost: Decimal,
    price: Decimal,
    sale_quantities: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LotRow> for InventoryLot {
    fn from(row: LotRow) -> Self {
        InventoryLot {
            id: row.id,
            purchase_order: row.purchase_order,
            product: row.product,
            size: row.size,
            purchase_quantities: row.purchase_quantities,
            purchase_cost: row.purchase_cost,
            price: row.price,
            sale_quantities: row.sale_quantities,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Totals row for the filtered set
#[derive(Debug, FromRow)]
struct TotalsRow {
    total_size: i64,
    total_sale: Decimal,
    total_cost: Decimal,
    total_profit: Decimal,
}

/// Escape `%`, `_` and the escape character itself for a LIKE pattern
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, query: &InventoryQuery) {
    builder.push(" WHERE TRUE");

    match query.remain_filter() {
        RemainFilter::All => {}
        RemainFilter::Remaining => {
            builder.push(" AND purchase_quantities - sale_quantities > 0");
        }
        RemainFilter::SoldOut => {
            builder.push(" AND purchase_quantities - sale_quantities = 0");
        }
    }

    if let Some(term) = query.search_term() {
        let pattern = format!("%{}%", escape_like(term));
        builder
            .push(" AND (product ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR purchase_order ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR size ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

impl PgInventoryStore {
    /// Create a new PgInventoryStore instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Load a lot and hold its row lock until the transaction ends
    async fn lock_lot(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> AppResult<InventoryLot> {
        let row = sqlx::query_as::<_, LotRow>(&format!(
            "SELECT {} FROM inventory_items WHERE id = $1 FOR UPDATE",
            LOT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::item_not_found(id))?;

        Ok(row.into())
    }
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    async fn query(&self, query: &InventoryQuery) -> AppResult<InventoryCollection> {
        validate_query(query)?;
        let offset = i64::try_from(query.offset())
            .map_err(|_| AppError::ValidationError("pageIndex is out of range".to_string()))?;

        let mut totals = QueryBuilder::new(
            r#"
            SELECT COUNT(*) AS total_size,
                   COALESCE(SUM(price * sale_quantities), 0) AS total_sale,
                   COALESCE(SUM(purchase_cost * purchase_quantities), 0) AS total_cost,
                   COALESCE(SUM((price - purchase_cost) * sale_quantities), 0) AS total_profit
            FROM inventory_items
            "#,
        );
        push_filter(&mut totals, query);
        let totals: TotalsRow = totals.build_query_as().fetch_one(&self.db).await?;

        let mut page = QueryBuilder::new(format!("SELECT {} FROM inventory_items", LOT_COLUMNS));
        push_filter(&mut page, query);
        page.push(" ORDER BY seq LIMIT ")
            .push_bind(i64::from(query.page_size))
            .push(" OFFSET ")
            .push_bind(offset);
        let rows: Vec<LotRow> = page.build_query_as().fetch_all(&self.db).await?;

        let items = rows
            .into_iter()
            .map(|row| InventoryLot::from(row).to_item())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(InventoryCollection {
            items,
            total_size: u64::try_from(totals.total_size).unwrap_or_default(),
            total_sale: totals.total_sale,
            total_cost: totals.total_cost,
            total_profit: totals.total_profit,
        })
    }

    async fn get(&self, id: Uuid) -> AppResult<InventoryItem> {
        let row = sqlx::query_as::<_, LotRow>(&format!(
            "SELECT {} FROM inventory_items WHERE id = $1",
            LOT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::item_not_found(id))?;

        Ok(InventoryLot::from(row).to_item()?)
    }

    async fn add(&self, item: NewInventoryItem) -> AppResult<InventoryItem> {
        let lot = item.into_lot(Uuid::new_v4(), Utc::now())?;

        sqlx::query(
            r#"
            INSERT INTO inventory_items (
                id, purchase_order, product, size, purchase_quantities,
                purchase_cost, price, sale_quantities, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(lot.id)
        .bind(&lot.purchase_order)
        .bind(&lot.product)
        .bind(&lot.size)
        .bind(lot.purchase_quantities)
        .bind(lot.purchase_cost)
        .bind(lot.price)
        .bind(lot.sale_quantities)
        .bind(lot.created_at)
        .bind(lot.updated_at)
        .execute(&self.db)
        .await?;

        tracing::info!(id = %lot.id, purchase_order = %lot.purchase_order, "Inventory item added");
        Ok(lot.to_item()?)
    }

    async fn sell(&self, sale: Sale) -> AppResult<InventoryItem> {
        let mut tx = self.db.begin().await?;

        let mut lot = Self::lock_lot(&mut tx, sale.id).await?;
        lot.apply_sale(&sale, Utc::now())?;

        sqlx::query(
            r#"
            UPDATE inventory_items
            SET price = $2, sale_quantities = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(lot.id)
        .bind(lot.price)
        .bind(lot.sale_quantities)
        .bind(lot.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            id = %lot.id,
            sold = sale.sale_quantities,
            remain = lot.remain_quantities(),
            "Inventory item sold"
        );
        Ok(lot.to_item()?)
    }

    async fn edit(&self, edit: InventoryEdit) -> AppResult<InventoryItem> {
        let mut tx = self.db.begin().await?;

        let mut lot = Self::lock_lot(&mut tx, edit.id).await?;
        lot.apply_edit(&edit, Utc::now())?;

        sqlx::query(
            r#"
            UPDATE inventory_items
            SET purchase_order = $2, product = $3, size = $4, purchase_quantities = $5,
                purchase_cost = $6, price = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(lot.id)
        .bind(&lot.purchase_order)
        .bind(&lot.product)
        .bind(&lot.size)
        .bind(lot.purchase_quantities)
        .bind(lot.purchase_cost)
        .bind(lot.price)
        .bind(lot.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(id = %lot.id, "Inventory item edited");
        Ok(lot.to_item()?)
    }

    async fn remove(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::item_not_found(id));
        }

        tracing::info!(id = %id, "Inventory item deleted");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
