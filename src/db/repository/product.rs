//! Product Repository

use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};

use super::RepoResult;
use crate::db::models::Product;

const COLUMNS: &str = "id, shop_id, name, price, image_url, is_available, created_at, updated_at";

pub async fn insert(
    pool: &SqlitePool,
    shop_id: i64,
    name: &str,
    price: f64,
    image_url: Option<&str>,
    is_available: bool,
) -> RepoResult<Product> {
    let now = Utc::now();
    let product = sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO products (shop_id, name, price, image_url, is_available, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING {COLUMNS}"
    ))
    .bind(shop_id)
    .bind(name)
    .bind(price)
    .bind(image_url)
    .bind(is_available)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(product)
}

/// Shop-scoped lookup: only finds the product when it belongs to `shop_id`
pub async fn find_in_shop(
    exec: impl SqliteExecutor<'_>,
    product_id: i64,
    shop_id: i64,
) -> RepoResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM products WHERE id = ?1 AND shop_id = ?2"
    ))
    .bind(product_id)
    .bind(shop_id)
    .fetch_optional(exec)
    .await?;
    Ok(product)
}

pub async fn find_for_shop(
    exec: impl SqliteExecutor<'_>,
    shop_id: i64,
) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM products WHERE shop_id = ?1 ORDER BY id DESC"
    ))
    .bind(shop_id)
    .fetch_all(exec)
    .await?;
    Ok(products)
}

/// Partial update; `None` fields keep their current value
pub async fn update(
    pool: &SqlitePool,
    product_id: i64,
    shop_id: i64,
    name: Option<&str>,
    price: Option<f64>,
    image_url: Option<Option<&str>>,
    is_available: Option<bool>,
) -> RepoResult<Option<Product>> {
    let now = Utc::now();
    // image_url distinguishes "leave unchanged" (outer None) from "clear".
    let (set_image, image_value) = match image_url {
        Some(value) => (true, value),
        None => (false, None),
    };
    let product = sqlx::query_as::<_, Product>(&format!(
        "UPDATE products SET \
            name = COALESCE(?1, name), \
            price = COALESCE(?2, price), \
            image_url = CASE WHEN ?3 THEN ?4 ELSE image_url END, \
            is_available = COALESCE(?5, is_available), \
            updated_at = ?6 \
         WHERE id = ?7 AND shop_id = ?8 RETURNING {COLUMNS}"
    ))
    .bind(name)
    .bind(price)
    .bind(set_image)
    .bind(image_value)
    .bind(is_available)
    .bind(now)
    .bind(product_id)
    .bind(shop_id)
    .fetch_optional(pool)
    .await?;
    Ok(product)
}

pub async fn delete(
    exec: impl SqliteExecutor<'_>,
    product_id: i64,
    shop_id: i64,
) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?1 AND shop_id = ?2")
        .bind(product_id)
        .bind(shop_id)
        .execute(exec)
        .await?;
    Ok(result.rows_affected() > 0)
}
