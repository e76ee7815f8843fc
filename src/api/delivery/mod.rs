//! Delivery API module (courier side)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/delivery/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/ready", get(handler::list_ready))
        .route("/{id}/take", post(handler::take))
        .route("/{id}/delivered", post(handler::delivered))
}
