//! HTTP surface: authentication, role gating, response envelope

mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use quickbite_server::auth::{JwtConfig, JwtService};
use quickbite_server::core::Config;
use quickbite_server::db::models::{Role, User};
use quickbite_server::{ServerState, api};

use common::{seed_user, setup_pool};

async fn test_app() -> (Router, ServerState) {
    let pool = setup_pool().await;
    let jwt_service = Arc::new(JwtService::with_config(JwtConfig {
        secret: "test-secret-test-secret-test-secret!".to_string(),
        expiration_minutes: 60,
        issuer: "quickbite-server".to_string(),
    }));
    let state = ServerState {
        config: Config {
            http_port: 0,
            database_path: ":memory:".to_string(),
            jwt: jwt_service.config.clone(),
            log_dir: None,
        },
        pool,
        jwt_service,
    };
    (api::build_app().with_state(state.clone()), state)
}

fn token_for(state: &ServerState, user: &User) -> String {
    state.jwt_service.generate_token(user).expect("token")
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn register_issues_a_usable_token() {
    let (app, _state) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "name": "Mika",
                "email": "mika@example.com",
                "password": "secret1",
                "role": "buyer"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    let token = body["data"]["token"].as_str().expect("token").to_string();
    assert!(body["data"]["user"].get("password_hash").is_none());

    // The fresh token opens an authenticated route.
    let response = app
        .oneshot(get_request("/api/shops", Some(&token)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_rejects_self_assigned_admin() {
    let (app, _state) = test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "name": "Mika",
                "email": "mika@example.com",
                "password": "secret1",
                "role": "admin"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["errors"]["role"][0].is_string());
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let (app, _state) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "name": "Mika",
                "email": "mika@example.com",
                "password": "secret1"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({
                "email": "mika@example.com",
                "password": "wrong-password"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_and_garbage_tokens_are_unauthorized() {
    let (app, _state) = test_app().await;

    let response = app
        .clone()
        .oneshot(get_request("/api/shops", None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(get_request("/api/shops", Some("not-a-token")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_role_is_forbidden_without_detail() {
    let (app, state) = test_app().await;
    let buyer = seed_user(&state.pool, "Buyer", "buyer@test.com", Role::Buyer).await;
    let token = token_for(&state, &buyer);

    let response = app
        .oneshot(get_request("/api/delivery/orders/ready", Some(&token)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Access denied."));
    assert_eq!(body.get("errors"), None);
}

#[tokio::test]
async fn admin_cannot_delete_own_account() {
    let (app, state) = test_app().await;
    let admin = seed_user(&state.pool, "Admin", "admin@test.com", Role::Admin).await;
    let token = token_for(&state, &admin);

    let response = app
        .oneshot(json_request(
            "DELETE",
            &format!("/api/users/{}", admin.id),
            Some(&token),
            json!({}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn health_answers_without_authentication() {
    let (app, _state) = test_app().await;

    let response = app
        .oneshot(get_request("/api/health", None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("ok"));
}
