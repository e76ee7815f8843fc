//! API Module
//!
//! One directory per resource, each exposing a `router()`:
//!
//! - [`auth`] - registration, login, logout
//! - [`users`] - admin user management
//! - [`shops`] - shop browsing for buyers
//! - [`orders`] - buyer order placement and tracking
//! - [`delivery`] - courier claim and completion
//! - [`shop_owner`] - shop-side catalog and order management
//! - [`health`] - health check

pub mod auth;
pub mod delivery;
pub mod health;
pub mod orders;
pub mod shop_owner;
pub mod shops;
pub mod users;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(shops::router())
        .merge(orders::router())
        .merge(delivery::router())
        .merge(shop_owner::router())
        .merge(health::router())
}

/// Build the fully configured application with all middleware
pub fn build_app() -> Router<ServerState> {
    build_router()
        // CORS - handle cross-origin requests from the web client
        .layer(CorsLayer::permissive())
        // Trace - request tracing at INFO level
        .layer(TraceLayer::new_for_http())
        // Request ID - generate a unique id for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}
