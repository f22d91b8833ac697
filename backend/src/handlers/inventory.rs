//! HTTP handlers for inventory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::{ApiJson, ApiQuery};
use crate::models::{
    InventoryCollection, InventoryEdit, InventoryIntent, InventoryItem, InventoryQuery,
    NewInventoryItem, Sale,
};
use crate::AppState;

/// Command carried by `POST /api/inventories`, selected by its `method` field
#[derive(Debug, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum InventoryCommand {
    Post(NewInventoryItem),
    Update(Sale),
    Edit(InventoryEdit),
    Delete { id: Uuid },
}

impl InventoryCommand {
    /// A body without `method` is an add
    pub fn from_body(mut body: Value) -> AppResult<Self> {
        if let Value::Object(fields) = &mut body {
            fields
                .entry("method")
                .or_insert_with(|| Value::String("post".to_string()));
        }

        serde_json::from_value(body).map_err(|e| AppError::Validation {
            field: "body".to_string(),
            message: format!("Invalid inventory command: {}", e),
            message_zh: format!("库存命令无效: {}", e),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub intent: InventoryIntent,
    #[serde(default)]
    pub filter: InventoryQuery,
}

/// List inventory items with totals
pub async fn list_inventories(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<InventoryQuery>,
) -> AppResult<Json<InventoryCollection>> {
    let query = state.clamp_query(query);
    let collection = state.store.query(&query).await?;
    Ok(Json(collection))
}

/// Get a single inventory item
pub async fn get_inventory(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<InventoryItem>> {
    let item = state.store.get(parse_item_id(&id)?).await?;
    Ok(Json(item))
}

/// Add an item, or run the command named by `method`
pub async fn post_inventory(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> AppResult<Response> {
    let response = match InventoryCommand::from_body(body)? {
        InventoryCommand::Post(item) => {
            let created = state.store.add(item).await?;
            (StatusCode::CREATED, Json(created)).into_response()
        }
        InventoryCommand::Update(sale) => Json(state.store.sell(sale).await?).into_response(),
        InventoryCommand::Edit(edit) => Json(state.store.edit(edit).await?).into_response(),
        InventoryCommand::Delete { id } => {
            state.store.remove(id).await?;
            StatusCode::NO_CONTENT.into_response()
        }
    };
    Ok(response)
}

/// Record a sale
pub async fn sell_inventory(
    State(state): State<AppState>,
    ApiJson(sale): ApiJson<Sale>,
) -> AppResult<Json<InventoryItem>> {
    let item = state.store.sell(sale).await?;
    Ok(Json(item))
}

/// Edit purchase details
pub async fn edit_inventory(
    State(state): State<AppState>,
    ApiJson(edit): ApiJson<InventoryEdit>,
) -> AppResult<Json<InventoryItem>> {
    let item = state.store.edit(edit).await?;
    Ok(Json(item))
}

/// Delete an item
pub async fn delete_inventory(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<DeleteParams>,
) -> AppResult<StatusCode> {
    state.store.remove(parse_item_id(&params.id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// No item is stored under a malformed id
fn parse_item_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::NotFound(format!("Inventory item {}", raw)))
}

/// Run one intent through the gateway and return the refreshed page
pub async fn submit_intent(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubmitRequest>,
) -> AppResult<Json<InventoryCollection>> {
    let filter = state.clamp_query(request.filter);
    let collection = state.gateway().submit(request.intent, &filter).await?;
    Ok(Json(collection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_defaults_to_post() {
        let command = InventoryCommand::from_body(json!({
            "purchaseOrder": "PO1",
            "product": "Shoe",
            "size": "42",
            "purchaseQuantities": 10,
            "purchaseCost": 5
        }))
        .unwrap();
        assert!(matches!(command, InventoryCommand::Post(_)));
    }

    #[test]
    fn test_command_update_is_a_sale() {
        let id = Uuid::new_v4();
        let command = InventoryCommand::from_body(json!({
            "id": id,
            "price": 8,
            "saleQuantities": 4,
            "method": "update"
        }))
        .unwrap();
        match command {
            InventoryCommand::Update(sale) => {
                assert_eq!(sale.id, id);
                assert_eq!(sale.sale_quantities, 4);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_malformed_id_is_not_found() {
        let id = Uuid::new_v4();
        assert_eq!(parse_item_id(&id.to_string()).unwrap(), id);

        let err = parse_item_id("abc").unwrap_err();
        assert_eq!(err.kind(), shared::ErrorKind::NotFound);
    }

    #[test]
    fn test_unknown_method_rejected() {
        let err = InventoryCommand::from_body(json!({ "method": "archive" })).unwrap_err();
        assert_eq!(err.kind(), shared::ErrorKind::ValidationFailed);
    }
}
