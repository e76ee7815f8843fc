//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`ApiResponse`] - unified errors and response envelope
//! - [`logger`] - tracing setup

pub mod error;
pub mod logger;

pub use error::{ApiResponse, AppError, FieldErrors};
pub use error::{created, ok, ok_empty};

/// Result type for API handlers and services
pub type AppResult<T> = Result<T, AppError>;
