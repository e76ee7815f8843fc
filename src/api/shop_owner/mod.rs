//! Shop owner API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shop/shops", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_shops).post(handler::create_shop))
        .route(
            "/{shop_id}/products",
            get(handler::list_products).post(handler::create_product),
        )
        .route(
            "/{shop_id}/products/{product_id}",
            put(handler::update_product).delete(handler::delete_product),
        )
        .route("/{shop_id}/orders", get(handler::list_orders))
        .route(
            "/{shop_id}/orders/{order_id}/status",
            post(handler::update_order_status),
        )
}
