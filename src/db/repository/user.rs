//! User Repository

use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};

use super::{RepoError, RepoResult};
use crate::db::models::{Role, User};

const COLUMNS: &str = "id, name, email, password_hash, role, created_at, updated_at";

pub async fn insert(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
    role: Role,
) -> RepoResult<User> {
    let now = Utc::now();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (name, email, password_hash, role, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!("Email already in use: {email}")),
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to read user after insert".into()))
}

pub async fn find_by_id(
    exec: impl SqliteExecutor<'_>,
    id: i64,
) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = ?1"))
        .bind(id)
        .fetch_optional(exec)
        .await?;
    Ok(user)
}

pub async fn find_by_email(
    exec: impl SqliteExecutor<'_>,
    email: &str,
) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE email = ?1"))
        .bind(email)
        .fetch_optional(exec)
        .await?;
    Ok(user)
}

pub async fn find_all(exec: impl SqliteExecutor<'_>) -> RepoResult<Vec<User>> {
    let users =
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users ORDER BY id DESC"))
            .fetch_all(exec)
            .await?;
    Ok(users)
}

pub async fn delete(exec: impl SqliteExecutor<'_>, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?1")
        .bind(id)
        .execute(exec)
        .await?;
    Ok(result.rows_affected() > 0)
}
