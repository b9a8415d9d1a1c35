#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use chrono::{Duration, Utc};
use petshop_api::{build_router, config::AppConfig, db, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

/// Application harness backed by a throwaway SQLite file.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _db_dir: TempDir,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let db_dir = TempDir::new().expect("temp dir for test database");
        let db_path = db_dir.path().join("petshop_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.cors_allow_any_origin = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = build_router(state.clone());

        Self {
            router,
            state,
            _db_dir: db_dir,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Creates John Doe and returns the response body.
    pub async fn create_customer(&self) -> Value {
        let response = self
            .request(
                Method::POST,
                "/api/customers",
                Some(json!({
                    "firstName": "John",
                    "lastName": "Doe",
                    "email": "john.doe@example.com",
                    "phone": "555-0100",
                    "address": "1 Kennel Lane"
                })),
            )
            .await;
        assert_eq!(response.status(), 201);
        response_json(response).await
    }

    pub async fn create_pet(&self, name: &str, price: &str) -> Value {
        let response = self
            .request(
                Method::POST,
                "/api/pets",
                Some(json!({
                    "name": name,
                    "price": price,
                    "kind": "Dog",
                    "color": "Golden",
                    "breed": "Golden Retriever",
                    "ageInMonths": 24,
                    "description": "Friendly"
                })),
            )
            .await;
        assert_eq!(response.status(), 201);
        response_json(response).await
    }

    /// Opens an order for `customer_id` with pickup tomorrow.
    pub async fn create_order(&self, customer_id: &str) -> Value {
        let response = self
            .request(
                Method::POST,
                "/api/orders",
                Some(json!({
                    "customerId": customer_id,
                    "pickupDate": tomorrow(),
                })),
            )
            .await;
        assert_eq!(response.status(), 201);
        response_json(response).await
    }

    pub async fn add_pet(&self, order_id: &str, pet_id: &str) -> Response {
        self.request(
            Method::POST,
            "/api/orders/add-pet",
            Some(json!({ "orderId": order_id, "petId": pet_id })),
        )
        .await
    }

    pub async fn remove_pet(&self, order_id: &str, pet_id: &str) -> Response {
        self.request(
            Method::DELETE,
            "/api/orders/remove-pet",
            Some(json!({ "orderId": order_id, "petId": pet_id })),
        )
        .await
    }

    pub async fn update_order(&self, order_id: &str, body: Value) -> Response {
        self.request(Method::PUT, &format!("/api/orders/{order_id}"), Some(body))
            .await
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

/// `message` field of an error body.
pub async fn error_message(response: Response) -> String {
    response_json(response).await["message"]
        .as_str()
        .expect("error message")
        .to_string()
}

pub fn tomorrow() -> String {
    (Utc::now() + Duration::days(1)).to_rfc3339()
}

pub fn yesterday() -> String {
    (Utc::now() - Duration::days(1)).to_rfc3339()
}

/// Reads a JSON decimal (serialized as a string) for numeric comparison.
pub fn decimal(value: &Value) -> rust_decimal::Decimal {
    match value {
        Value::String(s) => s.parse().expect("decimal string"),
        other => other.to_string().parse().expect("decimal number"),
    }
}

pub fn id(value: &Value) -> String {
    value["id"].as_str().expect("id field").to_string()
}
