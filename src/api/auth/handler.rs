//! Auth API Handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::{CurrentUser, password};
use crate::core::ServerState;
use crate::db::models::{Role, User};
use crate::db::repository::{self, RepoError};
use crate::utils::{ApiResponse, AppError, AppResult, created, ok, ok_empty};

/// Registration payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required."))]
    pub name: String,
    #[validate(email(message = "A valid email is required."))]
    #[validate(length(max = 150, message = "Email is too long."))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters."))]
    pub password: String,
    /// Defaults to `buyer`; `admin` cannot be self-assigned
    pub role: Option<Role>,
}

/// Login payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required."))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Authenticated session: the user plus a bearer token
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: User,
    pub token: String,
}

/// Register a new account
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthData>>)> {
    payload.validate()?;

    let role = payload.role.unwrap_or(Role::Buyer);
    if role == Role::Admin {
        return Err(AppError::validation_field(
            "Validation failed.",
            "role",
            "The admin role cannot be self-assigned.",
        ));
    }

    let password_hash = password::hash_password(&payload.password)?;
    let user = repository::user::insert(
        &state.pool,
        &payload.name,
        &payload.email,
        &password_hash,
        role,
    )
    .await
    .map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::validation_field(
            "Validation failed.",
            "email",
            "Email is already registered.",
        ),
        other => other.into(),
    })?;

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered");
    Ok(created("Registration successful.", AuthData { user, token }))
}

/// Log in with email and password
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthData>>> {
    payload.validate()?;

    let user = repository::user::find_by_email(&state.pool, &payload.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !password::verify_password(&payload.password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    Ok(ok("Login successful.", AuthData { user, token }))
}

/// Log out
///
/// Tokens are stateless; the server only acknowledges and the client
/// discards its copy.
pub async fn logout(user: CurrentUser) -> AppResult<Json<ApiResponse<()>>> {
    tracing::info!(user_id = user.id, "User logged out");
    Ok(ok_empty("Logged out."))
}
