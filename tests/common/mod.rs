//! Shared test fixtures: in-memory database and entity seeding

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use quickbite_server::db::models::{Product, Role, Shop, User};
use quickbite_server::db::repository;

/// Open an in-memory SQLite database with all migrations applied.
///
/// A single connection keeps the in-memory database alive and shared
/// across all uses of the pool.
pub async fn setup_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("connect options")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}

pub async fn seed_user(pool: &SqlitePool, name: &str, email: &str, role: Role) -> User {
    repository::user::insert(pool, name, email, "not-a-real-hash", role)
        .await
        .expect("seed user")
}

pub async fn seed_shop(pool: &SqlitePool, owner: &User, name: &str, lat: f64, lng: f64) -> Shop {
    repository::shop::insert(pool, owner.id, name, "1 Test Street", lat, lng)
        .await
        .expect("seed shop")
}

pub async fn seed_product(pool: &SqlitePool, shop: &Shop, name: &str, price: f64) -> Product {
    repository::product::insert(pool, shop.id, name, price, None, true)
        .await
        .expect("seed product")
}
