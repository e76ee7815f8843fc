//! Delivery Handlers (courier side)

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, Role};
use crate::db::repository;
use crate::services::lifecycle;
use crate::utils::{ApiResponse, AppResult, ok};

/// List orders that are ready for pickup and still unclaimed
pub async fn list_ready(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    user.require_role(Role::Delivery)?;

    let orders = repository::order::find_ready_unassigned(&state.pool).await?;
    Ok(ok("Orders ready for delivery.", orders))
}

/// Claim an order; first courier wins
pub async fn take(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Order>>> {
    user.require_role(Role::Delivery)?;

    let order = lifecycle::claim(&state.pool, user.id, id).await?;
    Ok(ok("Order taken for delivery.", order))
}

/// Complete a delivery
pub async fn delivered(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Order>>> {
    user.require_role(Role::Delivery)?;

    let order = lifecycle::mark_delivered(&state.pool, user.id, id).await?;
    Ok(ok("Order delivered.", order))
}
