//! Order Lifecycle Engine
//!
//! Validates and applies status transitions. The legal transitions are
//! declared once on [`OrderStatus`]; this module adds the actor gating:
//! which shop, buyer, or courier may trigger each move, and the atomic
//! claim that resolves courier races.

use sqlx::SqlitePool;

use crate::db::models::{Order, OrderStatus};
use crate::db::repository;
use crate::utils::{AppError, AppResult};

/// Statuses a shop owner may set through the generic status update
const SHOP_TARGETS: &[OrderStatus] = &[
    OrderStatus::Accepted,
    OrderStatus::Preparing,
    OrderStatus::ReadyForDelivery,
    OrderStatus::Cancelled,
];

/// Shop-owner driven transition (forward moves and cancellation)
///
/// The shop loses write access once a courier has taken custody. The order
/// lookup is scoped to the shop, so foreign orders read as not found.
pub async fn shop_update_status(
    pool: &SqlitePool,
    shop_id: i64,
    order_id: i64,
    target: OrderStatus,
) -> AppResult<Order> {
    if !SHOP_TARGETS.contains(&target) {
        return Err(AppError::validation_field(
            "Validation failed.",
            "status",
            format!("Status '{target}' cannot be set by the shop."),
        ));
    }

    let order = repository::order::find_for_shop(pool, order_id, shop_id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found in your shop."))?;

    if order.status.in_delivery() {
        return Err(AppError::business(
            "An order in delivery or already completed cannot be changed.",
        ));
    }

    if !order.status.can_transition_to(target) {
        return Err(AppError::business_field(
            "Invalid status transition.",
            "status",
            format!("Cannot move from '{}' to '{target}'.", order.status),
        ));
    }

    let updated = repository::order::update_status(pool, order.id, target).await?;
    tracing::info!(order_id = order.id, from = %order.status, to = %target, "Shop updated order status");
    Ok(updated)
}

/// Buyer-initiated cancellation
///
/// Allowed from any state before a courier takes custody; moves straight
/// to `cancelled`.
pub async fn cancel_by_buyer(
    pool: &SqlitePool,
    buyer_user_id: i64,
    order_id: i64,
) -> AppResult<Order> {
    let order = repository::order::find_for_buyer(pool, order_id, buyer_user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found."))?;

    if !order.status.can_transition_to(OrderStatus::Cancelled) {
        return Err(AppError::business_field(
            "The order cannot be cancelled in its current status.",
            "status",
            format!("Current status is '{}'.", order.status),
        ));
    }

    let updated = repository::order::update_status(pool, order.id, OrderStatus::Cancelled).await?;
    tracing::info!(order_id = order.id, from = %order.status, "Buyer cancelled order");
    Ok(updated)
}

/// Courier claim: `ready_for_delivery → delivering`, first claim wins
///
/// A single conditional update assigns the courier; when it affects no
/// rows the order is re-read to report the loss distinctly — not ready
/// (422) versus already taken by another courier (409).
pub async fn claim(pool: &SqlitePool, courier_user_id: i64, order_id: i64) -> AppResult<Order> {
    let affected = repository::order::claim(pool, order_id, courier_user_id).await?;

    if affected == 0 {
        let order = repository::order::find_by_id(pool, order_id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found."))?;

        // Assigned means another courier won the race (the winner also
        // moved the status, so check assignment before readiness).
        if order.delivery_user_id.is_some() {
            return Err(AppError::conflict("The order has already been taken."));
        }
        return Err(AppError::business_field(
            "The order is not ready for pickup.",
            "status",
            "Only orders in status ready_for_delivery can be taken.".to_string(),
        ));
    }

    let order = repository::order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::database("Order vanished after claim"))?;
    tracing::info!(order_id, courier_user_id, "Courier claimed order");
    Ok(order)
}

/// Courier completion: `delivering → delivered`, assigned courier only
pub async fn mark_delivered(
    pool: &SqlitePool,
    courier_user_id: i64,
    order_id: i64,
) -> AppResult<Order> {
    let order = repository::order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found."))?;

    if order.delivery_user_id != Some(courier_user_id) {
        return Err(AppError::Forbidden);
    }

    if order.status != OrderStatus::Delivering {
        return Err(AppError::business_field(
            "The order is not in delivery.",
            "status",
            "Only orders in status delivering can be completed.".to_string(),
        ));
    }

    let updated = repository::order::update_status(pool, order.id, OrderStatus::Delivered).await?;
    tracing::info!(order_id, courier_user_id, "Order delivered");
    Ok(updated)
}
