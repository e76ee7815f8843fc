//! Order Handlers (buyer side)

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderDetail, Role};
use crate::db::repository;
use crate::services::{CreateOrderRequest, lifecycle, order_creation};
use crate::utils::{ApiResponse, AppError, AppResult, created, ok};

/// Place a new order
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderDetail>>)> {
    user.require_role(Role::Buyer)?;

    let detail = order_creation::create_order(&state.pool, user.id, &payload).await?;
    Ok(created("Order placed.", detail))
}

/// List the buyer's own orders, newest first
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    user.require_role(Role::Buyer)?;

    let orders = repository::order::find_all_for_buyer(&state.pool, user.id).await?;
    Ok(ok("Order list.", orders))
}

/// Get one of the buyer's orders with its items
pub async fn detail(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    user.require_role(Role::Buyer)?;

    let order = repository::order::find_for_buyer(&state.pool, id, user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found."))?;
    let detail = repository::order::load_detail(&state.pool, order).await?;
    Ok(ok("Order detail.", detail))
}

/// Cancel one of the buyer's orders
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Order>>> {
    user.require_role(Role::Buyer)?;

    let order = lifecycle::cancel_by_buyer(&state.pool, user.id, id).await?;
    Ok(ok("Order cancelled.", order))
}
