//! End-to-end flow over the HTTP surface: catalog -> order -> invoice ->
//! payment, plus the failure paths that must leave no partial state.

use axum::Router;
use axum::body::Body;
use commerce_server::api;
use commerce_server::core::{Config, ServerState};
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_app() -> (Router, ServerState) {
    let state = ServerState::initialize(&Config::default());
    (api::build_app(state.clone()), state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn seed_product(app: &Router, name: &str, price: f64) -> String {
    let (status, product) = send(
        app,
        Method::POST,
        "/api/products",
        Some(json!({"name": name, "price": price, "category": "test"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    product["id"].as_str().unwrap().to_string()
}

fn shipping_address() -> Value {
    json!({"street": "1 Main St", "city": "Lyon", "postal_code": "69001", "country": "FR"})
}

#[tokio::test]
async fn order_invoice_payment_flow() {
    let (app, state) = test_app();
    let mut rx = state.events.subscribe();

    let p1 = seed_product(&app, "Widget", 10.0).await;
    let p2 = seed_product(&app, "Gadget", 5.5).await;

    // Worked scenario: 10.00 x 2 + 5.50 x 1 = 25.50.
    let (status, order) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({
            "client_id": "c1",
            "items": [
                {"product_id": p1, "quantity": 2},
                {"product_id": p2, "quantity": 1}
            ],
            "shipping_address": shipping_address()
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["total"], json!(25.5));
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["items"].as_array().unwrap().len(), 2);
    let order_id = order["id"].as_str().unwrap().to_string();

    // Invoice: subtotal 25.50, tax 5.10, total 30.60.
    let (status, invoice) = send(
        &app,
        Method::POST,
        "/api/invoices",
        Some(json!({"order_id": order_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(invoice["subtotal"], json!(25.5));
    assert_eq!(invoice["tax"], json!(5.1));
    assert_eq!(invoice["total"], json!(30.6));
    assert_eq!(invoice["status"], "ISSUED");

    // Mismatched amount is rejected before any charge.
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/payments",
        Some(json!({"order_id": order_id, "method": "CARD", "token": "tok_test", "amount": 10.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");

    // Payment for the exact total completes.
    let (status, payment) = send(
        &app,
        Method::POST,
        "/api/payments",
        Some(json!({"order_id": order_id, "method": "CARD", "token": "tok_test", "amount": 25.5})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(payment["status"], "COMPLETED");
    assert!(
        payment["transaction_id"]
            .as_str()
            .unwrap()
            .starts_with("txn_")
    );

    // The payment id is linked back onto the order.
    let (_, fetched) = send(&app, Method::GET, &format!("/api/orders/{}", order_id), None).await;
    assert_eq!(fetched["payment_id"], payment["id"]);
    assert_eq!(fetched["invoice_id"], invoice["id"]);

    // Any status may follow any other, and cancel overwrites DELIVERED.
    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/orders/{}/status", order_id),
        Some(json!({"status": "DELIVERED"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "DELIVERED");

    let (status, cancelled) = send(
        &app,
        Method::POST,
        &format!("/api/orders/{}/cancel", order_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "CANCELLED");

    // Lifecycle events reached the bus.
    let mut topics_seen = Vec::new();
    while let Ok(event) = rx.try_recv() {
        topics_seen.push(event.topic);
    }
    for expected in [
        "product.created",
        "order.created",
        "invoice.generated",
        "payment.processed",
        "order.status.updated",
        "order.cancelled",
    ] {
        assert!(
            topics_seen.iter().any(|t| t == expected),
            "missing event {expected}, saw {topics_seen:?}"
        );
    }
}

#[tokio::test]
async fn failed_order_creation_leaves_no_partial_state() {
    let (app, _state) = test_app();
    let p1 = seed_product(&app, "Widget", 10.0).await;

    // Second line references a product that does not exist.
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({
            "client_id": "c1",
            "items": [
                {"product_id": p1, "quantity": 1},
                {"product_id": "missing", "quantity": 2}
            ],
            "shipping_address": shipping_address()
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");

    let (_, orders) = send(&app, Method::GET, "/api/orders", None).await;
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn order_validation_happens_at_the_boundary() {
    let (app, _state) = test_app();

    // Empty item list.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({"client_id": "c1", "items": [], "shipping_address": shipping_address()})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Incomplete shipping address.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({
            "client_id": "c1",
            "items": [{"product_id": "p1", "quantity": 1}],
            "shipping_address": {"street": "1 Main St", "city": "", "postal_code": "69001", "country": "FR"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_client_email_conflicts() {
    let (app, _state) = test_app();

    let payload = json!({
        "email": "ada@example.com",
        "password": "hashed",
        "first_name": "Ada",
        "last_name": "Lovelace"
    });
    let (status, _) = send(&app, Method::POST, "/api/clients", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/api/clients", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");
}

#[tokio::test]
async fn invoice_for_unknown_order_is_not_found() {
    let (app, _state) = test_app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/invoices",
        Some(json!({"order_id": "missing"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stock_update_is_decoupled_from_orders() {
    let (app, _state) = test_app();
    let p1 = seed_product(&app, "Widget", 10.0).await;

    let (status, product) = send(
        &app,
        Method::PATCH,
        &format!("/api/products/{}/stock", p1),
        Some(json!({"quantity": 42})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["stock"], 42);

    // Ordering does not touch stock.
    let (_, order) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({
            "client_id": "c1",
            "items": [{"product_id": p1, "quantity": 5}],
            "shipping_address": shipping_address()
        })),
    )
    .await;
    assert_eq!(order["total"], json!(50.0));

    let (_, product) = send(&app, Method::GET, &format!("/api/products/{}", p1), None).await;
    assert_eq!(product["stock"], 42);
}
