use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::document::DocumentKind;

/// Errors raised while building a document.
///
/// Money and pricing failures abort the build before layout starts.
/// Layout failures carry the page and block that could not be placed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DocumentError {
    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("At least one line item is required")]
    EmptyItemSet,

    #[error("No line items supplied for {kind}")]
    NoItems { kind: DocumentKind },

    #[error(
        "Block {block_index} ({block_kind}) needs {height:.1}pt but only {available:.1}pt \
         fit on an empty page (page {page_index})"
    )]
    BlockExceedsPageHeight {
        page_index: usize,
        block_index: usize,
        block_kind: &'static str,
        height: f32,
        available: f32,
    },
}

impl DocumentError {
    pub fn invalid_amount(reason: impl Into<String>) -> Self {
        DocumentError::InvalidAmount {
            reason: reason.into(),
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Document(err @ DocumentError::BlockExceedsPageHeight { .. }) => {
                tracing::error!("Layout error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LAYOUT_ERROR",
                    err.to_string(),
                )
            }
            AppError::Document(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                err.to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
