//! Error handling for the Inventory Ledger
//!
//! Provides consistent error responses in English and Chinese

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{ErrorKind, Violation};
use thiserror::Error;
use validator::ValidationErrors;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_zh: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Remote store errors
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation { .. } | AppError::ValidationError(_) => {
                ErrorKind::ValidationFailed
            }
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Transport(_) => ErrorKind::TransportFailure,
            AppError::Configuration(_)
            | AppError::DatabaseError(_)
            | AppError::Internal(_)
            | AppError::InternalError(_) => ErrorKind::Internal,
        }
    }

    /// Not-found error for an inventory item id
    pub fn item_not_found(id: uuid::Uuid) -> Self {
        AppError::NotFound(format!("Inventory item {}", id))
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Transport(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> ErrorDetail {
        match self {
            AppError::Validation {
                field,
                message,
                message_zh,
            } => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message_en: message.clone(),
                message_zh: message_zh.clone(),
                field: Some(field.clone()),
            },
            AppError::ValidationError(msg) => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message_en: msg.clone(),
                message_zh: format!("数据无效: {}", msg),
                field: None,
            },
            AppError::NotFound(resource) => ErrorDetail {
                code: "NOT_FOUND".to_string(),
                message_en: format!("{} not found", resource),
                message_zh: format!("未找到 {}", resource),
                field: None,
            },
            AppError::Transport(msg) => ErrorDetail {
                code: "TRANSPORT_FAILURE".to_string(),
                message_en: format!("Inventory service unreachable: {}", msg),
                message_zh: format!("无法连接库存服务: {}", msg),
                field: None,
            },
            AppError::Configuration(msg) => ErrorDetail {
                code: "CONFIGURATION_ERROR".to_string(),
                message_en: format!("Configuration error: {}", msg),
                message_zh: format!("配置错误: {}", msg),
                field: None,
            },
            AppError::DatabaseError(_) => ErrorDetail {
                code: "DATABASE_ERROR".to_string(),
                message_en: "A database error occurred".to_string(),
                message_zh: "数据库错误".to_string(),
                field: None,
            },
            AppError::Internal(msg) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message_en: msg.clone(),
                message_zh: "服务器内部错误".to_string(),
                field: None,
            },
            AppError::InternalError(_) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message_en: "An internal server error occurred".to_string(),
                message_zh: "服务器内部错误".to_string(),
                field: None,
            },
        }
    }
}

impl From<Violation> for AppError {
    fn from(violation: Violation) -> Self {
        AppError::Validation {
            field: violation.field,
            message: violation.message,
            message_zh: violation.message_zh,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Violation::from(errors).into()
    }
}

impl From<ErrorResponse> for AppError {
    /// Rebuild an error from a body produced by [`IntoResponse`], so a remote
    /// failure keeps its kind on this side of the wire.
    fn from(response: ErrorResponse) -> Self {
        let ErrorDetail {
            code,
            message_en,
            message_zh,
            field,
        } = response.error;

        match code.as_str() {
            "VALIDATION_ERROR" => match field {
                Some(field) => AppError::Validation {
                    field,
                    message: message_en,
                    message_zh,
                },
                None => AppError::ValidationError(message_en),
            },
            "NOT_FOUND" => AppError::NotFound(
                message_en
                    .strip_suffix(" not found")
                    .unwrap_or(&message_en)
                    .to_string(),
            ),
            "TRANSPORT_FAILURE" => AppError::Transport(message_en),
            _ => AppError::Internal(message_en),
        }
    }
}

/// Error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_zh: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        if status.is_server_error() {
            tracing::error!(code = %detail.code, "Error: {:?}", self);
        } else {
            tracing::warn!(code = %detail.code, "Rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
