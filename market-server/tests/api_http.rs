//! HTTP boundary behavior: response envelopes, error status mapping and
//! principal extraction from the identity gateway headers.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use market_server::api;
use market_server::auth::{PRINCIPAL_ID_HEADER, PRINCIPAL_ROLE_HEADER};
use market_server::core::{Config, ServerState};
use market_server::db::models::{ProduceCategory, ProduceUnit, ProductCreate};
use market_server::db::repository::ProductRepository;

async fn test_state() -> ServerState {
    let config = Config::with_overrides("/tmp/market-test", 0);
    ServerState::in_memory(config).await.unwrap()
}

/// Seed a product directly through the repository and return its full id
async fn seed_product(state: &ServerState, quantity: i64) -> String {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .create(
            "user:wanjiku",
            ProductCreate {
                name: "Tomatoes".to_string(),
                description: "Ripe greenhouse tomatoes".to_string(),
                price: Decimal::from(100),
                quantity,
                unit: ProduceUnit::Kg,
                category: ProduceCategory::Vegetables,
                images: vec![],
                is_available: Some(true),
                location: "Nakuru".to_string(),
                harvested_date: None,
                expiry_date: None,
            },
        )
        .await
        .unwrap();
    product.id.unwrap().to_string()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(
    method: &str,
    uri: &str,
    principal: Option<(&str, &str)>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((id, role)) = principal {
        builder = builder
            .header(PRINCIPAL_ID_HEADER, id)
            .header(PRINCIPAL_ROLE_HEADER, role);
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn sample_cart(product_id: &str, quantity: u32) -> Value {
    json!({
        "items": [{ "product": product_id, "quantity": quantity }],
        "delivery_address": {
            "street": "12 Moi Avenue",
            "city": "Nairobi",
            "state": "Nairobi",
            "postal_code": "00100"
        },
        "payment_method": "mpesa"
    })
}

#[tokio::test]
async fn test_health_reports_ok() {
    let app = api::router(test_state().await);

    let response = app
        .oneshot(json_request("GET", "/api/health", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_missing_principal_is_unauthorized() {
    let app = api::router(test_state().await);

    let response = app
        .oneshot(json_request("GET", "/api/orders", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], 1001);
    assert_eq!(body["error"]["kind"], "auth");
}

#[tokio::test]
async fn test_malformed_role_is_rejected() {
    let app = api::router(test_state().await);

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/orders",
            Some(("user:amina", "vendor")),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], 1002);
}

#[tokio::test]
async fn test_product_creation_is_farmer_only() {
    let state = test_state().await;
    let app = api::router(state);

    let payload = json!({
        "name": "Sukuma wiki",
        "description": "Fresh collard greens",
        "price": "40",
        "quantity": 30,
        "unit": "bunch",
        "category": "vegetables",
        "location": "Kiambu"
    });

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/products",
            Some(("user:amina", "customer")),
            Some(payload.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/products",
            Some(("user:wanjiku", "farmer")),
            Some(payload),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Sukuma wiki");

    // the catalog is public
    let response = app
        .oneshot(json_request("GET", "/api/products", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_order_creation_flow_over_http() {
    let state = test_state().await;
    let product_id = seed_product(&state, 10).await;
    let app = api::router(state);

    // a customer orders two units
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/orders",
            Some(("user:amina", "customer")),
            Some(sample_cart(&product_id, 2)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["payment_status"], "pending");
    assert_eq!(body["data"]["total_amount"], "200");

    // a farmer may not order
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/orders",
            Some(("user:otieno", "farmer")),
            Some(sample_cart(&product_id, 1)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"]["kind"], "permission");

    // over-asking yields a conflict
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/orders",
            Some(("user:amina", "customer")),
            Some(sample_cart(&product_id, 50)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], 6003);
}

#[tokio::test]
async fn test_unknown_product_maps_to_not_found() {
    let app = api::router(test_state().await);

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/products/product:ghost",
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], 6001);
    assert_eq!(body["error"]["kind"], "product");
}
