//! Inventory lot models
//!
//! A lot is one purchase of a product in a given size. Stored fields are the
//! purchase figures plus the units sold so far; remaining units, total cost
//! and profit are always derived from them and never persisted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::{deserialize_lenient_count, deserialize_lenient_quantity, InventoryQuery};
use crate::validation::{
    validate_amount, validate_quantity, validate_sold_within_purchased, Violation,
};

/// Stored state of one lot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryLot {
    pub id: Uuid,
    pub purchase_order: String,
    pub product: String,
    pub size: String,
    pub purchase_quantities: i64,
    /// Unit cost paid to the supplier
    pub purchase_cost: Decimal,
    /// Unit price of the most recent sale
    pub price: Decimal,
    /// Cumulative units sold
    pub sale_quantities: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryLot {
    pub fn remain_quantities(&self) -> i64 {
        self.purchase_quantities - self.sale_quantities
    }

    pub fn purchase_total_cost(&self) -> Result<Decimal, Violation> {
        self.purchase_cost
            .checked_mul(Decimal::from(self.purchase_quantities))
            .ok_or_else(|| out_of_range("purchaseCost"))
    }

    pub fn sale_revenue(&self) -> Result<Decimal, Violation> {
        self.price
            .checked_mul(Decimal::from(self.sale_quantities))
            .ok_or_else(|| out_of_range("price"))
    }

    /// Margin on the units actually sold
    pub fn profit(&self) -> Result<Decimal, Violation> {
        self.price
            .checked_sub(self.purchase_cost)
            .and_then(|margin| margin.checked_mul(Decimal::from(self.sale_quantities)))
            .ok_or_else(|| out_of_range("price"))
    }

    /// Every derived figure must be representable before a lot is stored
    fn check_figures(&self) -> Result<(), Violation> {
        self.purchase_total_cost()?;
        self.sale_revenue()?;
        self.profit()?;
        Ok(())
    }

    pub fn to_item(&self) -> Result<InventoryItem, Violation> {
        Ok(InventoryItem {
            id: self.id,
            purchase_order: self.purchase_order.clone(),
            product: self.product.clone(),
            size: self.size.clone(),
            purchase_quantities: self.purchase_quantities,
            purchase_cost: self.purchase_cost,
            purchase_total_cost: self.purchase_total_cost()?,
            price: self.price,
            sale_quantities: self.sale_quantities,
            remain_quantities: self.remain_quantities(),
            profit: self.profit()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    /// Whether this lot passes the query's remain filter and search text
    pub fn matches(&self, query: &InventoryQuery) -> bool {
        if !query.remain_filter().admits(self.remain_quantities()) {
            return false;
        }

        match query.search_term() {
            None => true,
            Some(term) => {
                let needle = term.to_lowercase();
                [&self.product, &self.purchase_order, &self.size]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
        }
    }

    /// Record a sale. The lot is left untouched when the sale is rejected.
    pub fn apply_sale(&mut self, sale: &Sale, at: DateTime<Utc>) -> Result<(), Violation> {
        validate_amount("price", sale.price)?;
        validate_quantity("saleQuantities", sale.sale_quantities)?;

        let sold = self
            .sale_quantities
            .checked_add(sale.sale_quantities)
            .ok_or_else(|| {
                Violation::new("saleQuantities", "Sale quantities overflow", "销售数量溢出")
            })?;
        validate_sold_within_purchased(sold, self.purchase_quantities)?;

        let next = InventoryLot {
            price: sale.price,
            sale_quantities: sold,
            updated_at: at,
            ..self.clone()
        };
        next.check_figures()?;

        *self = next;
        Ok(())
    }

    /// Overwrite the provided fields. Sold units are not editable, and the
    /// purchase quantity can never drop below them.
    pub fn apply_edit(&mut self, edit: &InventoryEdit, at: DateTime<Utc>) -> Result<(), Violation> {
        edit.validate()?;

        let mut next = self.clone();
        if let Some(purchase_order) = &edit.purchase_order {
            next.purchase_order = purchase_order.trim().to_string();
        }
        if let Some(product) = &edit.product {
            next.product = product.trim().to_string();
        }
        if let Some(size) = &edit.size {
            next.size = size.trim().to_string();
        }
        if let Some(quantities) = edit.purchase_quantities {
            validate_quantity("purchaseQuantities", quantities)?;
            next.purchase_quantities = quantities;
        }
        if let Some(cost) = edit.purchase_cost {
            validate_amount("purchaseCost", cost)?;
            next.purchase_cost = cost;
        }
        if let Some(price) = edit.price {
            validate_amount("price", price)?;
            next.price = price;
        }

        validate_sold_within_purchased(next.sale_quantities, next.purchase_quantities).map_err(
            |violation| Violation {
                field: "purchaseQuantities".to_string(),
                ..violation
            },
        )?;
        next.check_figures()?;

        next.updated_at = at;
        *self = next;
        Ok(())
    }
}

/// Wire representation of a lot, including derived figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    pub purchase_order: String,
    pub product: String,
    pub size: String,
    pub purchase_quantities: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub purchase_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub purchase_total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub sale_quantities: i64,
    pub remain_quantities: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for adding a lot.
///
/// Amounts serialize as decimal strings so nothing is lost between ledger
/// instances; numbers are accepted on the way in. Every field is optional on the wire so that a missing one is reported as a
/// validation failure naming the field, rather than as a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    #[validate(required, custom = "crate::validation::validate_not_blank")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_order: Option<String>,

    #[validate(required, custom = "crate::validation::validate_not_blank")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    #[validate(required, custom = "crate::validation::validate_not_blank")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[validate(required)]
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_quantity"
    )]
    pub purchase_quantities: Option<i64>,

    #[validate(required)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_cost: Option<Decimal>,

    /// Initial unit price; zero when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl NewInventoryItem {
    pub fn new(
        purchase_order: impl Into<String>,
        product: impl Into<String>,
        size: impl Into<String>,
        purchase_quantities: i64,
        purchase_cost: Decimal,
    ) -> Self {
        Self {
            purchase_order: Some(purchase_order.into()),
            product: Some(product.into()),
            size: Some(size.into()),
            purchase_quantities: Some(purchase_quantities),
            purchase_cost: Some(purchase_cost),
            price: None,
        }
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Validate and build a fresh lot with nothing sold
    pub fn into_lot(self, id: Uuid, at: DateTime<Utc>) -> Result<InventoryLot, Violation> {
        self.validate()?;

        let purchase_order = required(self.purchase_order, "purchaseOrder")?;
        let product = required(self.product, "product")?;
        let size = required(self.size, "size")?;
        let purchase_quantities = required(self.purchase_quantities, "purchaseQuantities")?;
        let purchase_cost = required(self.purchase_cost, "purchaseCost")?;
        let price = self.price.unwrap_or(Decimal::ZERO);

        validate_quantity("purchaseQuantities", purchase_quantities)?;
        validate_amount("purchaseCost", purchase_cost)?;
        validate_amount("price", price)?;

        let lot = InventoryLot {
            id,
            purchase_order: purchase_order.trim().to_string(),
            product: product.trim().to_string(),
            size: size.trim().to_string(),
            purchase_quantities,
            purchase_cost,
            price,
            sale_quantities: 0,
            created_at: at,
            updated_at: at,
        };
        lot.check_figures()?;
        Ok(lot)
    }
}

fn out_of_range(field: &str) -> Violation {
    Violation::new(
        field,
        format!("{} puts a derived amount out of range", field),
        format!("{} 导致计算金额超出范围", field),
    )
}

fn accumulate(total: Decimal, amount: Decimal, field: &str) -> Result<Decimal, Violation> {
    total.checked_add(amount).ok_or_else(|| {
        Violation::new(
            field,
            format!("{} is out of range", field),
            format!("{} 超出范围", field),
        )
    })
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, Violation> {
    value.ok_or_else(|| {
        Violation::new(
            field,
            format!("{} is required", field),
            format!("{} 为必填项", field),
        )
    })
}

/// Units sold from an existing lot at a unit price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub price: Decimal,
    #[serde(deserialize_with = "deserialize_lenient_count")]
    pub sale_quantities: i64,
}

impl Sale {
    pub fn new(id: Uuid, price: Decimal, sale_quantities: i64) -> Self {
        Self {
            id,
            price,
            sale_quantities,
        }
    }
}

/// Partial update of a lot's purchase details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEdit {
    pub id: Uuid,

    #[validate(custom = "crate::validation::validate_not_blank")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_order: Option<String>,

    #[validate(custom = "crate::validation::validate_not_blank")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    #[validate(custom = "crate::validation::validate_not_blank")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_quantity"
    )]
    pub purchase_quantities: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_cost: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl InventoryEdit {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

/// One page of items plus totals over every item matching the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCollection {
    pub items: Vec<InventoryItem>,
    /// Number of matching items across all pages
    pub total_size: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sale: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_profit: Decimal,
}

impl Default for InventoryCollection {
    fn default() -> Self {
        Self::empty()
    }
}

impl InventoryCollection {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_size: 0,
            total_sale: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            total_profit: Decimal::ZERO,
        }
    }

    /// Filter `lots` (already in insertion order) by `query`, cut out the
    /// requested page, and total every match regardless of the page.
    /// Fails when a total does not fit in a `Decimal`.
    pub fn assemble<'a, I>(lots: I, query: &InventoryQuery) -> Result<Self, Violation>
    where
        I: IntoIterator<Item = &'a InventoryLot>,
    {
        let start = query.offset();
        let end = start + u64::from(query.page_size);

        let mut collection = Self::empty();
        for lot in lots.into_iter().filter(|lot| lot.matches(query)) {
            let position = collection.total_size;
            if position >= start && position < end {
                collection.items.push(lot.to_item()?);
            }
            collection.total_size += 1;
            collection.total_sale =
                accumulate(collection.total_sale, lot.sale_revenue()?, "totalSale")?;
            collection.total_cost =
                accumulate(collection.total_cost, lot.purchase_total_cost()?, "totalCost")?;
            collection.total_profit =
                accumulate(collection.total_profit, lot.profit()?, "totalProfit")?;
        }
        Ok(collection)
    }
}

/// Everything a caller can ask of the inventory, as one value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InventoryIntent {
    Fetch,
    Add { item: NewInventoryItem },
    Sell { sale: Sale },
    Edit { edit: InventoryEdit },
    Delete { id: Uuid },
}

impl InventoryIntent {
    pub fn name(&self) -> &'static str {
        match self {
            InventoryIntent::Fetch => "fetch",
            InventoryIntent::Add { .. } => "add",
            InventoryIntent::Sell { .. } => "sell",
            InventoryIntent::Edit { .. } => "edit",
            InventoryIntent::Delete { .. } => "delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RemainFilter;

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn lot(po: &str, product: &str, size: &str, purchased: i64, cost: i64) -> InventoryLot {
        NewInventoryItem::new(po, product, size, purchased, dec(cost))
            .into_lot(Uuid::new_v4(), Utc::now())
            .unwrap()
    }

    #[test]
    fn test_new_lot_has_nothing_sold() {
        let lot = lot("PO1", "Shoe", "42", 10, 5);
        assert_eq!(lot.sale_quantities, 0);
        assert_eq!(lot.price, Decimal::ZERO);
        assert_eq!(lot.remain_quantities(), 10);
        assert_eq!(lot.purchase_total_cost().unwrap(), dec(50));
        assert_eq!(lot.profit().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_sell_updates_derived_figures() {
        let mut lot = lot("PO1", "Shoe", "42", 10, 5);
        lot.apply_sale(&Sale::new(lot.id, dec(8), 4), Utc::now())
            .unwrap();

        let item = lot.to_item().unwrap();
        assert_eq!(item.sale_quantities, 4);
        assert_eq!(item.remain_quantities, 6);
        assert_eq!(item.price, dec(8));
        assert_eq!(item.profit, dec(12));
        assert_eq!(item.purchase_total_cost, dec(50));
    }

    #[test]
    fn test_sales_accumulate() {
        let mut lot = lot("PO1", "Shoe", "42", 10, 5);
        lot.apply_sale(&Sale::new(lot.id, dec(8), 4), Utc::now())
            .unwrap();
        lot.apply_sale(&Sale::new(lot.id, dec(9), 6), Utc::now())
            .unwrap();

        assert_eq!(lot.sale_quantities, 10);
        assert_eq!(lot.remain_quantities(), 0);
        assert_eq!(lot.price, dec(9));
    }

    #[test]
    fn test_oversell_is_rejected_without_mutation() {
        let mut lot = lot("PO1", "Shoe", "42", 10, 5);
        let before = lot.clone();

        let err = lot
            .apply_sale(&Sale::new(lot.id, dec(8), 11), Utc::now())
            .unwrap_err();
        assert_eq!(err.field, "saleQuantities");
        assert_eq!(lot, before);
    }

    #[test]
    fn test_negative_sale_is_rejected() {
        let mut lot = lot("PO1", "Shoe", "42", 10, 5);
        assert!(lot
            .apply_sale(&Sale::new(lot.id, dec(8), -1), Utc::now())
            .is_err());
        assert!(lot
            .apply_sale(&Sale::new(lot.id, dec(-8), 1), Utc::now())
            .is_err());
        assert_eq!(lot.sale_quantities, 0);
    }

    #[test]
    fn test_add_requires_every_field() {
        let mut item = NewInventoryItem::new("PO1", "Shoe", "42", 10, dec(5));
        item.size = None;
        let err = item.into_lot(Uuid::new_v4(), Utc::now()).unwrap_err();
        assert_eq!(err.field, "size");

        let item = NewInventoryItem::new("PO1", "  ", "42", 10, dec(5));
        let err = item.into_lot(Uuid::new_v4(), Utc::now()).unwrap_err();
        assert_eq!(err.field, "product");

        let item = NewInventoryItem::new("PO1", "Shoe", "42", -3, dec(5));
        let err = item.into_lot(Uuid::new_v4(), Utc::now()).unwrap_err();
        assert_eq!(err.field, "purchaseQuantities");
    }

    #[test]
    fn test_edit_cannot_drop_below_sold() {
        let mut lot = lot("PO1", "Shoe", "42", 10, 5);
        lot.apply_sale(&Sale::new(lot.id, dec(8), 6), Utc::now())
            .unwrap();

        let mut edit = InventoryEdit::new(lot.id);
        edit.purchase_quantities = Some(5);
        let err = lot.apply_edit(&edit, Utc::now()).unwrap_err();
        assert_eq!(err.field, "purchaseQuantities");
        assert_eq!(lot.purchase_quantities, 10);

        edit.purchase_quantities = Some(6);
        edit.product = Some("Boot".to_string());
        lot.apply_edit(&edit, Utc::now()).unwrap();
        assert_eq!(lot.remain_quantities(), 0);
        assert_eq!(lot.product, "Boot");
        assert_eq!(lot.sale_quantities, 6);
    }

    #[test]
    fn test_matches_search_and_remain() {
        let mut shoe = lot("PO-100", "Running Shoe", "42", 2, 5);
        let hat = lot("PO-200", "Hat", "M", 3, 5);

        let query = InventoryQuery::default().with_search("SHOE");
        assert!(shoe.matches(&query));
        assert!(!hat.matches(&query));

        let query = InventoryQuery::default().with_search("po-2");
        assert!(hat.matches(&query));

        shoe.apply_sale(&Sale::new(shoe.id, dec(9), 2), Utc::now())
            .unwrap();
        let sold_out = InventoryQuery::default().with_remain(RemainFilter::SoldOut);
        assert!(shoe.matches(&sold_out));
        assert!(!hat.matches(&sold_out));
    }

    #[test]
    fn test_assemble_totals_cover_all_pages() {
        let mut lots: Vec<_> = (0..7)
            .map(|i| lot(&format!("PO{}", i), "Shoe", "42", 10, 5))
            .collect();
        for lot in lots.iter_mut() {
            lot.apply_sale(&Sale::new(lot.id, dec(8), 1), Utc::now())
                .unwrap();
        }

        let first = InventoryCollection::assemble(&lots, &InventoryQuery::page(5, 1)).unwrap();
        let second = InventoryCollection::assemble(&lots, &InventoryQuery::page(5, 2)).unwrap();
        let beyond = InventoryCollection::assemble(&lots, &InventoryQuery::page(5, 3)).unwrap();

        assert_eq!(first.items.len(), 5);
        assert_eq!(second.items.len(), 2);
        assert!(beyond.items.is_empty());

        for page in [&first, &second, &beyond] {
            assert_eq!(page.total_size, 7);
            assert_eq!(page.total_cost, dec(350));
            assert_eq!(page.total_sale, dec(56));
            assert_eq!(page.total_profit, dec(21));
        }
        assert_eq!(first.items[0].purchase_order, "PO0");
        assert_eq!(second.items[0].purchase_order, "PO5");
    }

    #[test]
    fn test_oversized_figures_are_rejected_before_mutation() {
        let huge = 9_000_000_000_000_000_000;

        let err = NewInventoryItem::new("PO1", "Shoe", "42", huge, dec(10_000_000_000))
            .into_lot(Uuid::new_v4(), Utc::now())
            .unwrap_err();
        assert_eq!(err.field, "purchaseCost");

        let mut lot = lot("PO1", "Shoe", "42", huge, 0);
        let before = lot.clone();

        let mut edit = InventoryEdit::new(lot.id);
        edit.purchase_cost = Some(dec(1_000_000_000_000));
        let err = lot.apply_edit(&edit, Utc::now()).unwrap_err();
        assert_eq!(err.field, "purchaseCost");
        assert_eq!(lot, before);

        let err = lot
            .apply_sale(
                &Sale::new(lot.id, dec(1_000_000_000_000), huge),
                Utc::now(),
            )
            .unwrap_err();
        assert_eq!(err.field, "price");
        assert_eq!(lot, before);
        assert!(lot.to_item().is_ok());
    }

    #[test]
    fn test_assemble_reports_total_overflow() {
        let huge = 9_000_000_000_000_000_000;
        let lots = vec![
            lot("PO1", "Shoe", "42", huge, 8_000_000_000),
            lot("PO2", "Shoe", "42", huge, 8_000_000_000),
        ];

        let err = InventoryCollection::assemble(&lots, &InventoryQuery::page(5, 1)).unwrap_err();
        assert_eq!(err.field, "totalCost");

        // Either lot on its own still totals fine
        let single = InventoryCollection::assemble(
            &lots,
            &InventoryQuery::page(5, 1).with_search("PO2"),
        )
        .unwrap();
        assert_eq!(single.total_size, 1);
    }

    #[test]
    fn test_item_serializes_camel_case_numbers() {
        let lot = lot("PO1", "Shoe", "42", 10, 5);
        let json = serde_json::to_value(lot.to_item().unwrap()).unwrap();

        assert_eq!(json["purchaseOrder"], "PO1");
        assert_eq!(json["purchaseQuantities"], 10);
        assert_eq!(json["purchaseCost"], 5.0);
        assert_eq!(json["remainQuantities"], 10);
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_new_item_accepts_console_strings() {
        let item: NewInventoryItem = serde_json::from_str(
            r#"{"purchaseOrder":"PO1","product":"Shoe","size":"42","purchaseQuantities":"10","purchaseCost":"5.5"}"#,
        )
        .unwrap();
        assert_eq!(item.purchase_quantities, Some(10));
        assert_eq!(item.purchase_cost, Some(Decimal::new(55, 1)));
    }

    #[test]
    fn test_request_amounts_keep_full_precision() {
        let cost = Decimal::from_str_exact("1234567890.123456789012").unwrap();
        let item = NewInventoryItem::new("PO1", "Shoe", "42", 1, cost).with_price(cost);

        let json = serde_json::to_string(&item).unwrap();
        let back: NewInventoryItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.purchase_cost, Some(cost));
        assert_eq!(back.price, Some(cost));

        let sale = Sale::new(Uuid::new_v4(), cost, 1);
        let back: Sale = serde_json::from_str(&serde_json::to_string(&sale).unwrap()).unwrap();
        assert_eq!(back.price, cost);
    }

    #[test]
    fn test_intent_wire_shape() {
        let intent: InventoryIntent = serde_json::from_str(r#"{"type":"fetch"}"#).unwrap();
        assert_eq!(intent, InventoryIntent::Fetch);

        let id = Uuid::new_v4();
        let intent: InventoryIntent =
            serde_json::from_str(&format!(r#"{{"type":"delete","id":"{}"}}"#, id)).unwrap();
        assert_eq!(intent.name(), "delete");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// No sequence of sales, accepted or not, can sell more than was bought
            #[test]
            fn prop_sales_never_exceed_purchase(
                purchased in 0i64..50,
                sales in prop::collection::vec((-2i64..20, 0i64..1000), 0..12),
            ) {
                let mut lot = lot("PO1", "Shoe", "42", purchased, 5);
                for (quantity, price_cents) in sales {
                    let before = lot.clone();
                    let sale = Sale::new(lot.id, Decimal::new(price_cents, 2), quantity);
                    match lot.apply_sale(&sale, Utc::now()) {
                        Ok(()) => prop_assert_eq!(
                            lot.sale_quantities,
                            before.sale_quantities + quantity
                        ),
                        Err(_) => prop_assert_eq!(&lot, &before),
                    }
                    prop_assert!(lot.sale_quantities <= lot.purchase_quantities);
                    prop_assert!(lot.remain_quantities() >= 0);
                }
            }
        }
    }
}
