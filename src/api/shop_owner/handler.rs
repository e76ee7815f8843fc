//! Shop Owner Handlers
//!
//! Every route first resolves the shop through an ownership-scoped lookup,
//! so a shop id belonging to someone else reads as not found rather than
//! forbidden.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderStatus, Product, Role, Shop};
use crate::db::repository;
use crate::services::lifecycle;
use crate::utils::{ApiResponse, AppError, AppResult, created, ok, ok_empty};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateShopRequest {
    #[validate(length(min = 1, max = 100, message = "Shop name is required."))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Address is required."))]
    pub address: String,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude is out of range."))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude is out of range."))]
    pub lng: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 100, message = "Product name is required."))]
    pub name: String,
    #[validate(range(min = 0.0, message = "Price must not be negative."))]
    pub price: f64,
    #[validate(url(message = "Image URL must be a valid URL."))]
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

/// Partial update; absent fields keep their current value.
/// `image_url: null` clears the image, absent leaves it unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 100, message = "Product name must not be empty."))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, message = "Price must not be negative."))]
    pub price: Option<f64>,
    #[serde(default, with = "double_option")]
    pub image_url: Option<Option<String>>,
    pub is_available: Option<bool>,
}

/// Deserializes a JSON field into `Option<Option<T>>`: absent stays the
/// serde default (`None`), explicit `null` becomes `Some(None)`.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(de).map(Some)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

async fn owned_shop(state: &ServerState, user: &CurrentUser, shop_id: i64) -> AppResult<Shop> {
    repository::shop::find_owned(&state.pool, shop_id, user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Shop not found."))
}

/// List the owner's shops
pub async fn list_shops(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Shop>>>> {
    user.require_role(Role::Shop)?;

    let shops = repository::shop::find_for_owner(&state.pool, user.id).await?;
    Ok(ok("Shop list.", shops))
}

/// Open a new shop
pub async fn create_shop(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CreateShopRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Shop>>)> {
    user.require_role(Role::Shop)?;
    payload.validate()?;

    let shop = repository::shop::insert(
        &state.pool,
        user.id,
        &payload.name,
        &payload.address,
        payload.lat,
        payload.lng,
    )
    .await?;

    tracing::info!(shop_id = shop.id, user_id = user.id, "Shop created");
    Ok(created("Shop created.", shop))
}

/// List products of one of the owner's shops
pub async fn list_products(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(shop_id): Path<i64>,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    user.require_role(Role::Shop)?;

    let shop = owned_shop(&state, &user, shop_id).await?;
    let products = repository::product::find_for_shop(&state.pool, shop.id).await?;
    Ok(ok("Product list.", products))
}

/// Add a product to one of the owner's shops
pub async fn create_product(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(shop_id): Path<i64>,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    user.require_role(Role::Shop)?;
    payload.validate()?;

    let shop = owned_shop(&state, &user, shop_id).await?;
    let product = repository::product::insert(
        &state.pool,
        shop.id,
        &payload.name,
        payload.price,
        payload.image_url.as_deref(),
        payload.is_available.unwrap_or(true),
    )
    .await?;

    tracing::info!(product_id = product.id, shop_id = shop.id, "Product created");
    Ok(created("Product created.", product))
}

/// Update a product
pub async fn update_product(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((shop_id, product_id)): Path<(i64, i64)>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    user.require_role(Role::Shop)?;
    payload.validate()?;

    let shop = owned_shop(&state, &user, shop_id).await?;
    let product = repository::product::update(
        &state.pool,
        product_id,
        shop.id,
        payload.name.as_deref(),
        payload.price,
        payload.image_url.as_ref().map(|inner| inner.as_deref()),
        payload.is_available,
    )
    .await?
    .ok_or_else(|| AppError::not_found("Product not found."))?;

    Ok(ok("Product updated.", product))
}

/// Remove a product
pub async fn delete_product(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((shop_id, product_id)): Path<(i64, i64)>,
) -> AppResult<Json<ApiResponse<()>>> {
    user.require_role(Role::Shop)?;

    let shop = owned_shop(&state, &user, shop_id).await?;
    let deleted = repository::product::delete(&state.pool, product_id, shop.id).await?;
    if !deleted {
        return Err(AppError::not_found("Product not found."));
    }

    Ok(ok_empty("Product deleted."))
}

/// List orders placed against one of the owner's shops
pub async fn list_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(shop_id): Path<i64>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    user.require_role(Role::Shop)?;

    let shop = owned_shop(&state, &user, shop_id).await?;
    let orders = repository::order::find_all_for_shop(&state.pool, shop.id).await?;
    Ok(ok("Order list.", orders))
}

/// Move an order to a new status
pub async fn update_order_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((shop_id, order_id)): Path<(i64, i64)>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    user.require_role(Role::Shop)?;

    let shop = owned_shop(&state, &user, shop_id).await?;
    let order = lifecycle::shop_update_status(&state.pool, shop.id, order_id, payload.status).await?;
    Ok(ok("Order status updated.", order))
}
