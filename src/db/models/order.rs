//! Order Model
//!
//! The order status graph is declared once here as a transition table and
//! checked centrally by the lifecycle engine, never by ad-hoc string
//! comparisons in handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status - a closed enumeration
///
/// Statuses only move forward along the chain
/// `created → accepted → preparing → ready_for_delivery → delivering →
/// delivered`, with `cancelled` reachable from every state before a courier
/// takes custody. `delivered` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum OrderStatus {
    Created,
    Accepted,
    Preparing,
    ReadyForDelivery,
    Delivering,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The set of statuses directly reachable from `self`
    pub fn transitions(self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Created => &[Accepted, Preparing, ReadyForDelivery, Cancelled],
            Accepted => &[Preparing, ReadyForDelivery, Cancelled],
            Preparing => &[ReadyForDelivery, Cancelled],
            ReadyForDelivery => &[Delivering, Cancelled],
            Delivering => &[Delivered],
            Delivered | Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        self.transitions().contains(&to)
    }

    /// No further transition is permitted from a terminal status
    pub fn is_terminal(self) -> bool {
        self.transitions().is_empty()
    }

    /// Custody has passed to a courier; the shop loses write access
    pub fn in_delivery(self) -> bool {
        matches!(self, OrderStatus::Delivering | OrderStatus::Delivered)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Preparing => "preparing",
            OrderStatus::ReadyForDelivery => "ready_for_delivery",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub shop_id: i64,
    pub buyer_user_id: i64,
    /// Null until a courier claims the order; immutable once set
    pub delivery_user_id: Option<i64>,
    pub status: OrderStatus,
    pub delivery_address: String,
    pub delivery_lat: Option<f64>,
    pub delivery_lng: Option<f64>,
    /// Computed once at creation, immutable afterwards
    pub estimated_km: Option<f64>,
    pub estimated_min: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new order row (always starts `created` and unassigned)
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub shop_id: i64,
    pub buyer_user_id: i64,
    pub delivery_address: String,
    pub delivery_lat: Option<f64>,
    pub delivery_lng: Option<f64>,
    pub estimated_km: Option<f64>,
    pub estimated_min: Option<i64>,
}

/// One product line within an order, fixed at creation
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Snapshot of the product price at order creation
    pub unit_price: f64,
}

/// Order item joined with its product name, for detail views
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderItemDetail {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

/// Full order detail including its line items
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
}
