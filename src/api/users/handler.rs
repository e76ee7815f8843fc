//! User Management Handlers (admin only)

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Role, User};
use crate::db::repository::{self, RepoError};
use crate::utils::{ApiResponse, AppError, AppResult, ok, ok_empty};

/// List all users
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    user.require_role(Role::Admin)?;

    let users = repository::user::find_all(&state.pool).await?;
    Ok(ok("User list.", users))
}

/// Delete a user account
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    user.require_role(Role::Admin)?;

    if id == user.id {
        return Err(AppError::business("You cannot delete your own account."));
    }

    let deleted = repository::user::delete(&state.pool, id)
        .await
        .map_err(|e| match e {
            RepoError::Constraint(_) => {
                AppError::business("The user still has orders assigned and cannot be deleted.")
            }
            other => other.into(),
        })?;
    if !deleted {
        return Err(AppError::not_found("User not found."));
    }

    tracing::info!(deleted_user_id = id, admin_id = user.id, "User deleted");
    Ok(ok_empty("User deleted."))
}
