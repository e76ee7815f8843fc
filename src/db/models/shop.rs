//! Shop Model

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Shop entity - owned by exactly one `shop` user
///
/// The location is used to estimate delivery distance at order creation.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Shop {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
