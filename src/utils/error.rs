//! Unified Error Handling
//!
//! Provides the application-wide error type and the API response envelope:
//! - [`AppError`] - application error enum
//! - [`ApiResponse`] - unified response structure
//!
//! Every error is translated to an HTTP status at the API boundary; nothing
//! here is treated as a fatal process error.

use std::collections::HashMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Field-level error map, e.g. `{"items": ["Product 'Pizza' is unavailable."]}`
pub type FieldErrors = HashMap<String, Vec<String>>;

/// Unified API response structure
///
/// ```json
/// {
///   "success": true,
///   "message": "Order created.",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication Errors ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    /// Uniform authorization failure. Carries no resource detail so a caller
    /// cannot probe for existence through 403 responses.
    #[error("Access denied")]
    Forbidden,

    // ========== Business Logic Errors ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        errors: Option<FieldErrors>,
    },

    #[error("{message}")]
    BusinessRule {
        message: String,
        errors: Option<FieldErrors>,
    },

    // ========== System Errors ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            errors: None,
        }
    }

    pub fn validation_field(
        msg: impl Into<String>,
        field: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::Validation {
            message: msg.into(),
            errors: Some(HashMap::from([(field.into(), vec![detail.into()])])),
        }
    }

    pub fn business(msg: impl Into<String>) -> Self {
        Self::BusinessRule {
            message: msg.into(),
            errors: None,
        }
    }

    pub fn business_field(
        msg: impl Into<String>,
        field: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::BusinessRule {
            message: msg.into(),
            errors: Some(HashMap::from([(field.into(), vec![detail.into()])])),
        }
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            // Authentication errors (401)
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication required.".to_string(),
                None,
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password.".to_string(),
                None,
            ),
            AppError::TokenExpired => {
                (StatusCode::UNAUTHORIZED, "Token expired.".to_string(), None)
            }
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Invalid token.".to_string(), None)
            }

            // Authorization errors (403)
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Access denied.".to_string(), None),

            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),

            // Conflict (409) - e.g. a lost courier claim race
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),

            // Validation / business rule (422)
            AppError::Validation { message, errors } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, errors)
            }
            AppError::BusinessRule { message, errors } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, errors)
            }

            // Database errors (500)
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error.".to_string(),
                    None,
                )
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_string(),
                    None,
                )
            }
        };

        let body = Json(ApiResponse::<()> {
            success: false,
            message,
            data: None,
            errors,
        });

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let mut errors: FieldErrors = HashMap::new();
        for (field, field_errors) in e.field_errors() {
            let messages = field_errors
                .iter()
                .map(|err| {
                    err.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for '{field}'."))
                })
                .collect();
            errors.insert(field.to_string(), messages);
        }
        AppError::Validation {
            message: "Validation failed.".to_string(),
            errors: Some(errors),
        }
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: message.into(),
        data: Some(data),
        errors: None,
    })
}

/// Create a successful response without a payload
pub fn ok_empty(message: impl Into<String>) -> Json<ApiResponse<()>> {
    Json(ApiResponse {
        success: true,
        message: message.into(),
        data: None,
        errors: None,
    })
}

/// Create a 201 Created response
pub fn created<T: Serialize>(
    message: impl Into<String>,
    data: T,
) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, ok(message, data))
}
