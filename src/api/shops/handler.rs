//! Shop Browsing Handlers (buyer side)

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Product, Role, Shop};
use crate::db::repository;
use crate::utils::{ApiResponse, AppError, AppResult, ok};

/// Query params for shop listing
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Substring filter on shop name or address
    pub q: Option<String>,
}

/// A shop together with its menu
#[derive(Debug, Serialize)]
pub struct ShopMenu {
    #[serde(flatten)]
    pub shop: Shop,
    pub products: Vec<Product>,
}

/// List shops, optionally filtered
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Shop>>>> {
    user.require_role(Role::Buyer)?;

    let shops = repository::shop::find_all(&state.pool, query.q.as_deref()).await?;
    Ok(ok("Shop list.", shops))
}

/// Get one shop with its products
pub async fn menu(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<ShopMenu>>> {
    user.require_role(Role::Buyer)?;

    let shop = repository::shop::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Shop not found."))?;
    let products = repository::product::find_for_shop(&state.pool, shop.id).await?;

    Ok(ok("Shop menu.", ShopMenu { shop, products }))
}
