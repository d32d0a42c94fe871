//! Typed error handling for the invoice dashboard
//!
//! The invoice actions never return these: rejected form input and failed
//! writes come back as an `ActionOutcome`. [`DashboardError`] covers the
//! surfaces around them, namely reads from the store, lookups by id,
//! serialization of cached pages and assembling the server from its
//! configuration.
//!
//! # Example
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! async fn load(store: &dyn InvoiceStore, id: Uuid) -> DashboardResult<Invoice> {
//!     store.get(&id).await?.ok_or(DashboardError::NotFound { id })
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The main error type of the dashboard
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No invoice with that id
    #[error("Invoice with id '{id}' not found")]
    NotFound { id: Uuid },

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DashboardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::NotFound { .. } => StatusCode::NOT_FOUND,
            DashboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Storage(_) => "STORAGE_ERROR",
            DashboardError::Config(_) => "CONFIG_ERROR",
            DashboardError::NotFound { .. } => "INVOICE_NOT_FOUND",
            DashboardError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    ///
    /// Storage and internal details stay in the logs; the body only carries
    /// a generic message for them.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            DashboardError::Storage(_) => "Database Error".to_string(),
            DashboardError::Internal(_) => "Internal Error".to_string(),
            other => other.to_string(),
        };
        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DashboardError::NotFound { id } => Some(serde_json::json!({ "id": id.to_string() })),
            _ => None,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by storage backends
///
/// Callers fold every variant into the same "Database Error" message; the
/// variants exist for logging.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Could not reach the backend
    #[error("Failed to connect to {backend}: {message}")]
    Connection { backend: String, message: String },

    /// Statement execution failed
    #[error("{backend} query error: {message}")]
    Query { backend: String, message: String },

    /// A stored row could not be mapped back to an invoice
    #[error("Data integrity error: {message}")]
    Integrity { message: String },

    /// Backend refused to serve
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {message}")]
    Io { path: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration{}: {message}", .file.as_deref().map(|f| format!(" in {}", f)).unwrap_or_default())]
    Parse {
        file: Option<String>,
        message: String,
    },

    /// A value is out of range
    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// The server was assembled without a store
    #[error("InvoiceStore is required. Call .with_store()")]
    MissingStore,
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Internal(err.to_string())
    }
}

/// A specialized Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

// =============================================================================
// Tests
// =============================================================================
