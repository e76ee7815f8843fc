//! Shop Repository

use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};

use super::RepoResult;
use crate::db::models::Shop;

const COLUMNS: &str = "id, user_id, name, address, lat, lng, created_at, updated_at";

pub async fn insert(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
    address: &str,
    lat: f64,
    lng: f64,
) -> RepoResult<Shop> {
    let now = Utc::now();
    let shop = sqlx::query_as::<_, Shop>(&format!(
        "INSERT INTO shops (user_id, name, address, lat, lng, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING {COLUMNS}"
    ))
    .bind(user_id)
    .bind(name)
    .bind(address)
    .bind(lat)
    .bind(lng)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(shop)
}

pub async fn find_by_id(exec: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Shop>> {
    let shop = sqlx::query_as::<_, Shop>(&format!("SELECT {COLUMNS} FROM shops WHERE id = ?1"))
        .bind(id)
        .fetch_optional(exec)
        .await?;
    Ok(shop)
}

/// Ownership-scoped lookup: only finds the shop when it belongs to `user_id`
pub async fn find_owned(
    exec: impl SqliteExecutor<'_>,
    shop_id: i64,
    user_id: i64,
) -> RepoResult<Option<Shop>> {
    let shop = sqlx::query_as::<_, Shop>(&format!(
        "SELECT {COLUMNS} FROM shops WHERE id = ?1 AND user_id = ?2"
    ))
    .bind(shop_id)
    .bind(user_id)
    .fetch_optional(exec)
    .await?;
    Ok(shop)
}

/// List all shops, optionally filtered by a name/address substring
pub async fn find_all(
    exec: impl SqliteExecutor<'_>,
    query: Option<&str>,
) -> RepoResult<Vec<Shop>> {
    let shops = match query {
        Some(q) => {
            let pattern = format!("%{q}%");
            sqlx::query_as::<_, Shop>(&format!(
                "SELECT {COLUMNS} FROM shops \
                 WHERE name LIKE ?1 OR address LIKE ?1 ORDER BY id DESC"
            ))
            .bind(pattern)
            .fetch_all(exec)
            .await?
        }
        None => {
            sqlx::query_as::<_, Shop>(&format!("SELECT {COLUMNS} FROM shops ORDER BY id DESC"))
                .fetch_all(exec)
                .await?
        }
    };
    Ok(shops)
}

pub async fn find_for_owner(
    exec: impl SqliteExecutor<'_>,
    user_id: i64,
) -> RepoResult<Vec<Shop>> {
    let shops = sqlx::query_as::<_, Shop>(&format!(
        "SELECT {COLUMNS} FROM shops WHERE user_id = ?1 ORDER BY id DESC"
    ))
    .bind(user_id)
    .fetch_all(exec)
    .await?;
    Ok(shops)
}
