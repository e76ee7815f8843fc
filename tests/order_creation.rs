//! Order creation: transactional placement, price snapshots, estimates

mod common;

use quickbite_server::db::models::{OrderStatus, Role};
use quickbite_server::db::repository;
use quickbite_server::services::order_creation::{
    CreateOrderRequest, OrderItemRequest, create_order,
};
use quickbite_server::utils::AppError;

use common::{seed_product, seed_shop, seed_user, setup_pool};

async fn order_count(pool: &sqlx::SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await
        .expect("count orders")
}

#[tokio::test]
async fn two_item_order_snapshots_line_totals() {
    let pool = setup_pool().await;
    let buyer = seed_user(&pool, "Buyer", "buyer@test.com", Role::Buyer).await;
    let owner = seed_user(&pool, "Owner", "owner@test.com", Role::Shop).await;
    let shop = seed_shop(&pool, &owner, "Grill", 44.8058, 20.4750).await;
    let burger = seed_product(&pool, &shop, "Burger", 500.0).await;
    let pizza = seed_product(&pool, &shop, "Pizza", 1000.0).await;

    let req = CreateOrderRequest {
        shop_id: shop.id,
        delivery_address: "42 Main Street".into(),
        delivery_lat: None,
        delivery_lng: None,
        items: vec![
            OrderItemRequest {
                product_id: burger.id,
                quantity: 2,
            },
            OrderItemRequest {
                product_id: pizza.id,
                quantity: 1,
            },
        ],
    };

    let detail = create_order(&pool, buyer.id, &req).await.expect("order");

    assert_eq!(detail.order.status, OrderStatus::Created);
    assert_eq!(detail.order.delivery_user_id, None);
    assert_eq!(detail.items.len(), 2);

    let total: f64 = detail
        .items
        .iter()
        .map(|i| i.unit_price * i.quantity as f64)
        .sum();
    assert_eq!(total, 2000.0);
}

#[tokio::test]
async fn price_change_never_touches_existing_orders() {
    let pool = setup_pool().await;
    let buyer = seed_user(&pool, "Buyer", "buyer@test.com", Role::Buyer).await;
    let owner = seed_user(&pool, "Owner", "owner@test.com", Role::Shop).await;
    let shop = seed_shop(&pool, &owner, "Grill", 44.8058, 20.4750).await;
    let burger = seed_product(&pool, &shop, "Burger", 500.0).await;

    let req = CreateOrderRequest {
        shop_id: shop.id,
        delivery_address: "42 Main Street".into(),
        delivery_lat: None,
        delivery_lng: None,
        items: vec![OrderItemRequest {
            product_id: burger.id,
            quantity: 1,
        }],
    };
    let detail = create_order(&pool, buyer.id, &req).await.expect("order");
    assert_eq!(detail.items[0].unit_price, 500.0);

    repository::product::update(&pool, burger.id, shop.id, None, Some(750.0), None, None)
        .await
        .expect("price update")
        .expect("product exists");

    let items = repository::order::find_items(&pool, detail.order.id)
        .await
        .expect("items");
    assert_eq!(items[0].unit_price, 500.0);
}

#[tokio::test]
async fn cross_shop_product_writes_nothing() {
    let pool = setup_pool().await;
    let buyer = seed_user(&pool, "Buyer", "buyer@test.com", Role::Buyer).await;
    let owner = seed_user(&pool, "Owner", "owner@test.com", Role::Shop).await;
    let shop_a = seed_shop(&pool, &owner, "Grill", 44.8058, 20.4750).await;
    let shop_b = seed_shop(&pool, &owner, "Bakery", 44.8100, 20.4600).await;
    let local = seed_product(&pool, &shop_a, "Burger", 500.0).await;
    let foreign = seed_product(&pool, &shop_b, "Croissant", 300.0).await;

    let req = CreateOrderRequest {
        shop_id: shop_a.id,
        delivery_address: "42 Main Street".into(),
        delivery_lat: None,
        delivery_lng: None,
        items: vec![
            OrderItemRequest {
                product_id: local.id,
                quantity: 1,
            },
            OrderItemRequest {
                product_id: foreign.id,
                quantity: 1,
            },
        ],
    };

    let before = order_count(&pool).await;
    let err = create_order(&pool, buyer.id, &req).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule { .. }), "{err:?}");
    assert_eq!(order_count(&pool).await, before);
}

#[tokio::test]
async fn unavailable_product_rejects_order() {
    let pool = setup_pool().await;
    let buyer = seed_user(&pool, "Buyer", "buyer@test.com", Role::Buyer).await;
    let owner = seed_user(&pool, "Owner", "owner@test.com", Role::Shop).await;
    let shop = seed_shop(&pool, &owner, "Grill", 44.8058, 20.4750).await;
    let burger = seed_product(&pool, &shop, "Burger", 500.0).await;

    repository::product::update(&pool, burger.id, shop.id, None, None, None, Some(false))
        .await
        .expect("availability update")
        .expect("product exists");

    let req = CreateOrderRequest {
        shop_id: shop.id,
        delivery_address: "42 Main Street".into(),
        delivery_lat: None,
        delivery_lng: None,
        items: vec![OrderItemRequest {
            product_id: burger.id,
            quantity: 1,
        }],
    };

    let err = create_order(&pool, buyer.id, &req).await.unwrap_err();
    match err {
        AppError::BusinessRule {
            errors: Some(map), ..
        } => {
            assert!(map["items"][0].contains("Burger"), "{map:?}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(order_count(&pool).await, 0);
}

#[tokio::test]
async fn empty_item_list_is_rejected() {
    let pool = setup_pool().await;
    let buyer = seed_user(&pool, "Buyer", "buyer@test.com", Role::Buyer).await;
    let owner = seed_user(&pool, "Owner", "owner@test.com", Role::Shop).await;
    let shop = seed_shop(&pool, &owner, "Grill", 44.8058, 20.4750).await;

    let req = CreateOrderRequest {
        shop_id: shop.id,
        delivery_address: "42 Main Street".into(),
        delivery_lat: None,
        delivery_lng: None,
        items: vec![],
    };

    let err = create_order(&pool, buyer.id, &req).await.unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }), "{err:?}");
}

#[tokio::test]
async fn estimates_require_full_destination() {
    let pool = setup_pool().await;
    let buyer = seed_user(&pool, "Buyer", "buyer@test.com", Role::Buyer).await;
    let owner = seed_user(&pool, "Owner", "owner@test.com", Role::Shop).await;
    let shop = seed_shop(&pool, &owner, "Grill", 44.8058, 20.4750).await;
    let burger = seed_product(&pool, &shop, "Burger", 500.0).await;

    let item = OrderItemRequest {
        product_id: burger.id,
        quantity: 1,
    };

    // Latitude alone is not a destination.
    let partial = CreateOrderRequest {
        shop_id: shop.id,
        delivery_address: "42 Main Street".into(),
        delivery_lat: Some(44.8058),
        delivery_lng: None,
        items: vec![item.clone()],
    };
    let detail = create_order(&pool, buyer.id, &partial).await.expect("order");
    assert_eq!(detail.order.estimated_km, None);
    assert_eq!(detail.order.estimated_min, None);

    // Same point as the shop: zero distance, baseline prep time.
    let full = CreateOrderRequest {
        shop_id: shop.id,
        delivery_address: "42 Main Street".into(),
        delivery_lat: Some(44.8058),
        delivery_lng: Some(20.4750),
        items: vec![item],
    };
    let detail = create_order(&pool, buyer.id, &full).await.expect("order");
    assert_eq!(detail.order.estimated_km, Some(0.0));
    assert_eq!(detail.order.estimated_min, Some(10));
}

#[tokio::test]
async fn unknown_shop_is_not_found() {
    let pool = setup_pool().await;
    let buyer = seed_user(&pool, "Buyer", "buyer@test.com", Role::Buyer).await;

    let req = CreateOrderRequest {
        shop_id: 999,
        delivery_address: "42 Main Street".into(),
        delivery_lat: None,
        delivery_lng: None,
        items: vec![OrderItemRequest {
            product_id: 1,
            quantity: 1,
        }],
    };

    let err = create_order(&pool, buyer.id, &req).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "{err:?}");
}
