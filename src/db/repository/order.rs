//! Order Repository
//!
//! Orders are inserted together with their items inside a caller-owned
//! transaction and are never physically deleted; cancellation is a status.
//! The courier claim is the one conditional atomic update in the system.

use chrono::Utc;
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

use super::{RepoError, RepoResult};
use crate::db::models::{NewOrder, Order, OrderDetail, OrderItem, OrderItemDetail, OrderStatus};

const COLUMNS: &str = "id, shop_id, buyer_user_id, delivery_user_id, status, delivery_address, \
                       delivery_lat, delivery_lng, estimated_km, estimated_min, created_at, \
                       updated_at";

pub async fn find_by_id(exec: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM orders WHERE id = ?1"))
        .bind(id)
        .fetch_optional(exec)
        .await?;
    Ok(order)
}

/// Buyer-scoped lookup: only finds the order when `buyer_user_id` matches
pub async fn find_for_buyer(
    exec: impl SqliteExecutor<'_>,
    order_id: i64,
    buyer_user_id: i64,
) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE id = ?1 AND buyer_user_id = ?2"
    ))
    .bind(order_id)
    .bind(buyer_user_id)
    .fetch_optional(exec)
    .await?;
    Ok(order)
}

/// Shop-scoped lookup: only finds the order when it belongs to `shop_id`
pub async fn find_for_shop(
    exec: impl SqliteExecutor<'_>,
    order_id: i64,
    shop_id: i64,
) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE id = ?1 AND shop_id = ?2"
    ))
    .bind(order_id)
    .bind(shop_id)
    .fetch_optional(exec)
    .await?;
    Ok(order)
}

pub async fn find_all_for_buyer(
    exec: impl SqliteExecutor<'_>,
    buyer_user_id: i64,
) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE buyer_user_id = ?1 ORDER BY id DESC"
    ))
    .bind(buyer_user_id)
    .fetch_all(exec)
    .await?;
    Ok(orders)
}

pub async fn find_all_for_shop(
    exec: impl SqliteExecutor<'_>,
    shop_id: i64,
) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE shop_id = ?1 ORDER BY id DESC"
    ))
    .bind(shop_id)
    .fetch_all(exec)
    .await?;
    Ok(orders)
}

/// Orders a courier may claim: ready for delivery and still unassigned
pub async fn find_ready_unassigned(exec: impl SqliteExecutor<'_>) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders \
         WHERE status = 'ready_for_delivery' AND delivery_user_id IS NULL \
         ORDER BY id DESC"
    ))
    .fetch_all(exec)
    .await?;
    Ok(orders)
}

/// Insert a new order row (status `created`, unassigned)
///
/// Runs on a caller-owned connection so the caller can make the order and
/// its items a single atomic unit.
pub async fn insert(conn: &mut SqliteConnection, new: &NewOrder) -> RepoResult<Order> {
    let now = Utc::now();
    let order = sqlx::query_as::<_, Order>(&format!(
        "INSERT INTO orders (shop_id, buyer_user_id, delivery_user_id, status, \
                             delivery_address, delivery_lat, delivery_lng, \
                             estimated_km, estimated_min, created_at, updated_at) \
         VALUES (?1, ?2, NULL, 'created', ?3, ?4, ?5, ?6, ?7, ?8, ?9) \
         RETURNING {COLUMNS}"
    ))
    .bind(new.shop_id)
    .bind(new.buyer_user_id)
    .bind(&new.delivery_address)
    .bind(new.delivery_lat)
    .bind(new.delivery_lng)
    .bind(new.estimated_km)
    .bind(new.estimated_min)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;
    Ok(order)
}

/// Insert one line item with its price snapshot
pub async fn insert_item(
    conn: &mut SqliteConnection,
    order_id: i64,
    product_id: i64,
    quantity: i64,
    unit_price: f64,
) -> RepoResult<OrderItem> {
    let item = sqlx::query_as::<_, OrderItem>(
        "INSERT INTO order_items (order_id, product_id, quantity, unit_price) \
         VALUES (?1, ?2, ?3, ?4) \
         RETURNING id, order_id, product_id, quantity, unit_price",
    )
    .bind(order_id)
    .bind(product_id)
    .bind(quantity)
    .bind(unit_price)
    .fetch_one(&mut *conn)
    .await?;
    Ok(item)
}

/// Non-conditional status update, for single-actor transitions
/// (shop forward moves, buyer/shop cancellation, courier completion)
pub async fn update_status(
    pool: &SqlitePool,
    order_id: i64,
    status: OrderStatus,
) -> RepoResult<Order> {
    let now = Utc::now();
    let order = sqlx::query_as::<_, Order>(&format!(
        "UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3 RETURNING {COLUMNS}"
    ))
    .bind(status)
    .bind(now)
    .bind(order_id)
    .fetch_optional(pool)
    .await?;
    order.ok_or_else(|| RepoError::NotFound(format!("Order {order_id} not found")))
}

/// Conditional atomic claim: assign the courier and move to `delivering`
/// only while the order is still `ready_for_delivery` and unassigned.
///
/// Returns the number of affected rows; zero means the claim lost — the
/// caller re-reads the row to distinguish "not ready" from "already taken".
pub async fn claim(
    exec: impl SqliteExecutor<'_>,
    order_id: i64,
    courier_user_id: i64,
) -> RepoResult<u64> {
    let now = Utc::now();
    let result = sqlx::query(
        "UPDATE orders SET status = 'delivering', delivery_user_id = ?1, updated_at = ?2 \
         WHERE id = ?3 AND status = 'ready_for_delivery' AND delivery_user_id IS NULL",
    )
    .bind(courier_user_id)
    .bind(now)
    .bind(order_id)
    .execute(exec)
    .await?;
    Ok(result.rows_affected())
}

/// Line items joined with product names, for detail views
pub async fn find_items(
    exec: impl SqliteExecutor<'_>,
    order_id: i64,
) -> RepoResult<Vec<OrderItemDetail>> {
    let items = sqlx::query_as::<_, OrderItemDetail>(
        "SELECT oi.id, oi.order_id, oi.product_id, p.name AS product_name, \
                oi.quantity, oi.unit_price \
         FROM order_items oi \
         JOIN products p ON p.id = oi.product_id \
         WHERE oi.order_id = ?1 \
         ORDER BY oi.id",
    )
    .bind(order_id)
    .fetch_all(exec)
    .await?;
    Ok(items)
}

/// Assemble the full detail for an order that is known to exist
pub async fn load_detail(pool: &SqlitePool, order: Order) -> RepoResult<OrderDetail> {
    let items = find_items(pool, order.id).await?;
    Ok(OrderDetail { order, items })
}
