//! Domain Services
//!
//! - [`estimate`] - great-circle distance and delivery-time estimation
//! - [`lifecycle`] - the order status state machine and its actor gating
//! - [`order_creation`] - transactional order placement

pub mod estimate;
pub mod lifecycle;
pub mod order_creation;

pub use order_creation::{CreateOrderRequest, OrderItemRequest};
