//! Order Creation Service
//!
//! Orchestrates order placement: cross-entity validation, price
//! snapshotting, delivery estimation, and atomic persistence of the order
//! plus its items. Everything runs inside one transaction; a failed
//! validation writes nothing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use validator::Validate;

use crate::db::models::{NewOrder, OrderDetail, Product};
use crate::db::repository;
use crate::services::estimate;
use crate::utils::{AppError, AppResult};

/// One requested product line
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemRequest {
    pub product_id: i64,
    #[validate(range(min = 1, message = "Quantity must be at least 1."))]
    pub quantity: i64,
}

/// Order placement payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub shop_id: i64,
    #[validate(length(min = 1, max = 255, message = "Delivery address is required."))]
    pub delivery_address: String,
    pub delivery_lat: Option<f64>,
    pub delivery_lng: Option<f64>,
    #[validate(length(min = 1, message = "At least one item is required."))]
    #[validate(nested)]
    pub items: Vec<OrderItemRequest>,
}

/// Create an order for a buyer
///
/// Validation order: shop exists, every distinct product resolves within
/// that shop, every product is available, quantities are positive. Unit
/// prices are snapshotted from the current catalog price; later price
/// edits never touch existing orders.
pub async fn create_order(
    pool: &SqlitePool,
    buyer_user_id: i64,
    req: &CreateOrderRequest,
) -> AppResult<OrderDetail> {
    req.validate()?;

    let mut tx = pool.begin().await?;

    let shop = repository::shop::find_by_id(&mut *tx, req.shop_id)
        .await?
        .ok_or_else(|| AppError::not_found("Shop not found."))?;

    // The matched products must exactly cover the requested distinct ids.
    let mut distinct_ids: Vec<i64> = Vec::new();
    for item in &req.items {
        if !distinct_ids.contains(&item.product_id) {
            distinct_ids.push(item.product_id);
        }
    }

    let mut products: HashMap<i64, Product> = HashMap::new();
    for product_id in &distinct_ids {
        match repository::product::find_in_shop(&mut *tx, *product_id, shop.id)
            .await
            .map_err(AppError::from)?
        {
            Some(product) => {
                products.insert(*product_id, product);
            }
            None => {
                return Err(AppError::business(
                    "Some products do not belong to the selected shop.",
                ));
            }
        }
    }

    for item in &req.items {
        let product = &products[&item.product_id];
        if !product.is_available {
            return Err(AppError::business_field(
                "Some product is unavailable.",
                "items",
                format!("Product '{}' is currently unavailable.", product.name),
            ));
        }
    }

    // Estimates only when a full destination is supplied.
    let (estimated_km, estimated_min) = match (req.delivery_lat, req.delivery_lng) {
        (Some(lat), Some(lng)) => {
            let (km, min) = estimate::estimate(shop.lat, shop.lng, lat, lng);
            (Some(km), Some(min))
        }
        _ => (None, None),
    };

    let order = repository::order::insert(
        &mut tx,
        &NewOrder {
            shop_id: shop.id,
            buyer_user_id,
            delivery_address: req.delivery_address.clone(),
            delivery_lat: req.delivery_lat,
            delivery_lng: req.delivery_lng,
            estimated_km,
            estimated_min,
        },
    )
    .await
    .map_err(AppError::from)?;

    for item in &req.items {
        let product = &products[&item.product_id];
        repository::order::insert_item(&mut tx, order.id, product.id, item.quantity, product.price)
            .await
            .map_err(AppError::from)?;
    }

    tx.commit().await?;

    tracing::info!(
        order_id = order.id,
        shop_id = shop.id,
        buyer_user_id,
        items = req.items.len(),
        "Order created"
    );

    Ok(repository::order::load_detail(pool, order).await?)
}
