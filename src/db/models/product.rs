//! Product Model

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Product entity - belongs to exactly one shop
///
/// `is_available` is a manual flag set by the shop owner, not an inventory
/// count. `price` is the current catalog price; orders snapshot it into
/// their items at creation time.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub shop_id: i64,
    pub name: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
