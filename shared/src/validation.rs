//! Validation utilities for the Inventory Ledger
//!
//! Every rejected input is reported as a [`Violation`] naming the offending
//! wire field, with an English and a Chinese message for the admin console.

use rust_decimal::Decimal;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::types::InventoryQuery;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct Violation {
    /// camelCase wire name of the field
    pub field: String,
    pub message: String,
    pub message_zh: String,
}

impl Violation {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        message_zh: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            message_zh: message_zh.into(),
        }
    }
}

impl From<ValidationErrors> for Violation {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let Some((field, errs)) = fields.into_iter().next() else {
            return Violation::new("body", "Invalid input", "输入数据无效");
        };

        let field = camel_case(field);
        let code = errs.first().map(|e| e.code.as_ref()).unwrap_or("invalid");
        match code {
            "required" => Violation::new(
                field.clone(),
                format!("{} is required", field),
                format!("{} 为必填项", field),
            ),
            "blank" => Violation::new(
                field.clone(),
                format!("{} cannot be blank", field),
                format!("{} 不能为空", field),
            ),
            _ => Violation::new(
                field.clone(),
                format!("{} is invalid", field),
                format!("{} 无效", field),
            ),
        }
    }
}

/// Convert a Rust field name (`purchase_order`) to its wire name (`purchaseOrder`)
pub fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Reject strings that are empty once whitespace is trimmed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Validate a unit count (purchase or sale quantities)
pub fn validate_quantity(field: &str, quantity: i64) -> Result<(), Violation> {
    if quantity < 0 {
        return Err(Violation::new(
            field,
            format!("{} cannot be negative", field),
            format!("{} 不能为负数", field),
        ));
    }
    Ok(())
}

/// Validate a unit price or cost
pub fn validate_amount(field: &str, amount: Decimal) -> Result<(), Violation> {
    if amount < Decimal::ZERO {
        return Err(Violation::new(
            field,
            format!("{} cannot be negative", field),
            format!("{} 不能为负数", field),
        ));
    }
    Ok(())
}

/// Units sold can never exceed units purchased
pub fn validate_sold_within_purchased(
    sale_quantities: i64,
    purchase_quantities: i64,
) -> Result<(), Violation> {
    if sale_quantities > purchase_quantities {
        return Err(Violation::new(
            "saleQuantities",
            format!(
                "Sale quantities ({}) exceed purchase quantities ({})",
                sale_quantities, purchase_quantities
            ),
            format!(
                "销售数量 ({}) 超过采购数量 ({})",
                sale_quantities, purchase_quantities
            ),
        ));
    }
    Ok(())
}

/// Pages are 1-indexed and hold at least one item
pub fn validate_query(query: &InventoryQuery) -> Result<(), Violation> {
    if query.page_size == 0 {
        return Err(Violation::new(
            "pageSize",
            "pageSize must be at least 1",
            "每页数量至少为 1",
        ));
    }
    if query.page_index == 0 {
        return Err(Violation::new(
            "pageIndex",
            "pageIndex starts at 1",
            "页码从 1 开始",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("purchase_order"), "purchaseOrder");
        assert_eq!(camel_case("purchase_quantities"), "purchaseQuantities");
        assert_eq!(camel_case("size"), "size");
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("PO-1").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity("purchaseQuantities", 0).is_ok());
        assert!(validate_quantity("purchaseQuantities", 10).is_ok());

        let err = validate_quantity("purchaseQuantities", -1).unwrap_err();
        assert_eq!(err.field, "purchaseQuantities");
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("price", Decimal::ZERO).is_ok());
        assert!(validate_amount("price", Decimal::new(1999, 2)).is_ok());
        assert!(validate_amount("price", Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_validate_sold_within_purchased() {
        assert!(validate_sold_within_purchased(0, 0).is_ok());
        assert!(validate_sold_within_purchased(10, 10).is_ok());

        let err = validate_sold_within_purchased(11, 10).unwrap_err();
        assert_eq!(err.field, "saleQuantities");
    }

    #[test]
    fn test_validate_query() {
        assert!(validate_query(&InventoryQuery::page(5, 1)).is_ok());
        assert_eq!(
            validate_query(&InventoryQuery::page(0, 1)).unwrap_err().field,
            "pageSize"
        );
        assert_eq!(
            validate_query(&InventoryQuery::page(5, 0)).unwrap_err().field,
            "pageIndex"
        );
    }

    #[test]
    fn test_violation_from_validation_errors_picks_first_field() {
        let mut errors = ValidationErrors::new();
        errors.add("size", ValidationError::new("required"));
        errors.add("purchase_order", ValidationError::new("blank"));

        let violation = Violation::from(errors);
        assert_eq!(violation.field, "purchaseOrder");
        assert_eq!(violation.message, "purchaseOrder cannot be blank");
    }
}
