//! Database Models

pub mod order;
pub mod product;
pub mod shop;
pub mod user;

pub use order::{NewOrder, Order, OrderDetail, OrderItem, OrderItemDetail, OrderStatus};
pub use product::Product;
pub use shop::Shop;
pub use user::{Role, User};
