//! Inventory API client
//!
//! Speaks the `/api/inventories` wire contract to another ledger instance and
//! implements [`InventoryStore`] over it, so the gateway can drive a remote
//! ledger exactly as it drives a local one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    validate_query, InventoryCollection, InventoryEdit, InventoryItem, InventoryQuery,
    NewInventoryItem, Sale,
};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{AppError, AppResult, ErrorResponse};
use crate::services::store::InventoryStore;

/// Inventory API client
#[derive(Clone)]
pub struct InventoryApiClient {
    client: Client,
    base_url: String,
}

/// Body of `POST /api/inventories`: the payload plus its `method`
#[derive(Serialize)]
struct Command<'a, T> {
    #[serde(flatten)]
    payload: &'a T,
    method: &'static str,
}

fn transport(error: reqwest::Error) -> AppError {
    AppError::Transport(error.to_string())
}

impl InventoryApiClient {
    /// Create a new InventoryApiClient
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> AppResult<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::Configuration("client.base_url is not set".to_string()))?;

        Self::new(base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/inventories{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request.send().await.map_err(transport)?;
        check(response).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to parse inventory response: {}", e)))
    }
}

/// Turn a non-success response back into the error the server raised
async fn check(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.map_err(transport)?;
    if let Ok(error) = serde_json::from_str::<ErrorResponse>(&body) {
        return Err(error.into());
    }

    match status {
        StatusCode::BAD_REQUEST
        | StatusCode::UNPROCESSABLE_ENTITY
        | StatusCode::UNSUPPORTED_MEDIA_TYPE => Err(AppError::Validation {
            field: "body".to_string(),
            message: format!("Request rejected ({}): {}", status, body),
            message_zh: format!("请求被拒绝 ({}): {}", status, body),
        }),
        _ => Err(AppError::Transport(format!(
            "Inventory API error: {} - {}",
            status, body
        ))),
    }
}

#[async_trait]
impl InventoryStore for InventoryApiClient {
    async fn query(&self, query: &InventoryQuery) -> AppResult<InventoryCollection> {
        validate_query(query)?;
        self.send_json(self.client.get(self.url("")).query(query))
            .await
    }

    async fn get(&self, id: Uuid) -> AppResult<InventoryItem> {
        self.send_json(self.client.get(self.url(&format!("/{}", id))))
            .await
    }

    async fn add(&self, item: NewInventoryItem) -> AppResult<InventoryItem> {
        let body = Command {
            payload: &item,
            method: "post",
        };
        self.send_json(self.client.post(self.url("")).json(&body))
            .await
    }

    async fn sell(&self, sale: Sale) -> AppResult<InventoryItem> {
        let body = Command {
            payload: &sale,
            method: "update",
        };
        self.send_json(self.client.put(self.url("")).json(&body))
            .await
    }

    async fn edit(&self, edit: InventoryEdit) -> AppResult<InventoryItem> {
        self.send_json(self.client.patch(self.url("")).json(&edit))
            .await
    }

    async fn remove(&self, id: Uuid) -> AppResult<()> {
        self.send(self.client.delete(self.url("")).query(&[("id", id)]))
            .await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "remote"
    }
}
