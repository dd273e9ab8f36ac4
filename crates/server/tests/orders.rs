#![allow(clippy::unwrap_used)]

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use restaurant_orders_server::db::memory::MemoryStore;
use serde_json::{Value, json};

use common::{body_json, build_app, empty_request, json_request, send};

fn tea(quantity: u32, price: f64) -> Value {
    json!({ "productId": "p1", "name": "Tea", "quantity": quantity, "price": price })
}

#[tokio::test]
async fn create_order_computes_total() {
    let store = Arc::new(MemoryStore::new());
    let app = build_app(store.clone());

    let response = send(
        &app,
        json_request(
            "POST",
            "/orders",
            &json!({ "order": [tea(2, 3.0)], "payment": "cash" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let order = body_json(response).await;
    assert_eq!(order["total"], 6.0);
    assert_eq!(order["paymentMethod"], "cash");
    assert_eq!(order["recension"], "");
    assert_eq!(order["orderItems"][0]["productId"], "p1");
    assert_eq!(order["orderItems"][0]["name"], "Tea");
    assert_eq!(order["_id"].as_str().unwrap().len(), 24);
    assert!(order["createdAt"].is_string());
    assert_eq!(store.order_count().await, 1);
}

#[tokio::test]
async fn create_order_sums_lines_and_keeps_item_order() {
    let app = build_app(Arc::new(MemoryStore::new()));

    let items = json!([
        { "productId": "p2", "name": "Coffee", "quantity": 1, "price": 3.5 },
        { "productId": "p3", "name": "Sandwich", "quantity": 2, "price": 7.25 },
        { "productId": "p1", "name": "Tea", "quantity": 3, "price": 3 },
    ]);
    let response = send(
        &app,
        json_request(
            "POST",
            "/orders",
            &json!({ "order": items, "payment": "card", "recension": "Lovely" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let order = body_json(response).await;
    assert_eq!(order["total"], 27.0);
    assert_eq!(order["paymentMethod"], "card");
    assert_eq!(order["recension"], "Lovely");

    let names: Vec<&str> = order["orderItems"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Coffee", "Sandwich", "Tea"]);
}

#[tokio::test]
async fn client_supplied_total_is_ignored() {
    let app = build_app(Arc::new(MemoryStore::new()));

    let response = send(
        &app,
        json_request(
            "POST",
            "/orders",
            &json!({ "order": [tea(1, 4.0)], "payment": "cash", "total": 1000 }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["total"], 4.0);
}

#[tokio::test]
async fn missing_items_rejected() {
    let store = Arc::new(MemoryStore::new());
    let app = build_app(store.clone());

    for body in [
        json!({ "payment": "cash" }),
        json!({ "order": [], "payment": "cash" }),
        json!({ "order": [], "payment": "bitcoin" }),
    ] {
        let response = send(&app, json_request("POST", "/orders", &body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Order items are required." })
        );
    }
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn non_array_items_rejected() {
    let store = Arc::new(MemoryStore::new());
    let app = build_app(store.clone());

    for order in [json!("tea"), json!(5), json!({ "a": 1 }), Value::Null] {
        let response = send(
            &app,
            json_request("POST", "/orders", &json!({ "order": order, "payment": "cash" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Order items are required." })
        );
    }
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn items_without_price_rejected() {
    let store = Arc::new(MemoryStore::new());
    let app = build_app(store.clone());

    let response = send(
        &app,
        json_request(
            "POST",
            "/orders",
            &json!({ "order": [{ "name": "Tea", "quantity": 2 }], "payment": "cash" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Valid total is required."
    );
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn invalid_payment_rejected() {
    let store = Arc::new(MemoryStore::new());
    let app = build_app(store.clone());

    for payment in [
        json!("bitcoin"),
        json!("Cash"),
        json!(""),
        json!(5),
        json!(["cash"]),
        Value::Null,
    ] {
        let response = send(
            &app,
            json_request(
                "POST",
                "/orders",
                &json!({ "order": [tea(1, 2.0)], "payment": payment }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "Payment method must be either cash or card."
        );
    }
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn overflowing_total_rejected() {
    let store = Arc::new(MemoryStore::new());
    let app = build_app(store.clone());

    let response = send(
        &app,
        json_request(
            "POST",
            "/orders",
            &json!({ "order": [tea(10, 1e308)], "payment": "bitcoin" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Valid total is required."
    );
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn malformed_order_json_is_400() {
    let app = build_app(Arc::new(MemoryStore::new()));

    let request = Request::builder()
        .method("POST")
        .uri("/orders")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"order\": [ {"))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["message"].is_string());
}

#[tokio::test]
async fn create_order_store_failure_is_500() {
    let app = build_app(Arc::new(MemoryStore::unavailable("write concern failed")));

    let response = send(
        &app,
        json_request(
            "POST",
            "/orders",
            &json!({ "order": [tea(1, 2.0)], "payment": "card" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await["error"],
        "store unavailable: write concern failed"
    );
}

#[tokio::test]
async fn list_orders_in_insertion_order() {
    let app = build_app(Arc::new(MemoryStore::new()));

    let response = send(&app, empty_request("GET", "/orders")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));

    for (quantity, payment) in [(1, "cash"), (2, "card")] {
        let response = send(
            &app,
            json_request(
                "POST",
                "/orders",
                &json!({ "order": [tea(quantity, 2.5)], "payment": payment }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let orders = body_json(send(&app, empty_request("GET", "/orders")).await).await;
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["total"], 2.5);
    assert_eq!(orders[0]["paymentMethod"], "cash");
    assert_eq!(orders[1]["total"], 5.0);
    assert_eq!(orders[1]["paymentMethod"], "card");
}

#[tokio::test]
async fn list_orders_store_failure_is_500() {
    let app = build_app(Arc::new(MemoryStore::unavailable("down")));

    let response = send(&app, empty_request("GET", "/orders")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn orders_have_no_update_or_delete() {
    let app = build_app(Arc::new(MemoryStore::new()));

    let response = send(
        &app,
        json_request(
            "POST",
            "/orders",
            &json!({ "order": [tea(1, 2.0)], "payment": "cash" }),
        ),
    )
    .await;
    let id = body_json(response).await["_id"].as_str().unwrap().to_string();

    let response = send(&app, empty_request("DELETE", &format!("/orders/{id}"))).await;
    assert_ne!(response.status(), StatusCode::OK);

    let response = send(&app, empty_request("DELETE", "/orders")).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
