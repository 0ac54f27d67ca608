//! Error types for the embeddings service

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Result type alias for embeddings service operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Main error type for the embeddings service
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Extension point kept from the original service contract. Nothing
    /// produces this variant today; if a handler ever does, it surfaces as
    /// HTTP 418 with a templated message.
    #[error("Oops! {name} exception.")]
    Teapot { name: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors related to loading and running the embedding model
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model file not found: {0}")]
    ModelFileNotFound(String),

    #[error("Tokenizer file not found: {0}")]
    TokenizerFileNotFound(String),

    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    #[error("Inference session error: {0}")]
    Session(#[from] ort::Error),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Unexpected model output shape: {0}")]
    OutputShape(String),

    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Teapot { name } => (
                StatusCode::IM_A_TEAPOT,
                Json(json!({ "message": format!("Oops! {} exception.", name) })),
            )
                .into_response(),
            // Everything else is an unanticipated runtime failure: fail
            // loudly with a generic 500.
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": other.to_string() })),
            )
                .into_response(),
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::Config(err.to_string())
    }
}
