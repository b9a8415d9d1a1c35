//! HTTP tests for the customer and pet catalogs plus the service endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{decimal, error_message, id, response_json, TestApp};
use rstest::rstest;
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn health_reports_healthy_database() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn status_reports_service_identity() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/status", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["service"], "petshop-api");
    assert_eq!(body["environment"], "test");
}

#[tokio::test]
async fn customer_crud_round_trip() {
    let app = TestApp::new().await;

    let created = app.create_customer().await;
    let customer_id = id(&created);
    assert_eq!(created["firstName"], "John");
    assert_eq!(created["lastName"], "Doe");
    assert!(created["createdDate"].is_string());

    let response = app.request(Method::GET, "/api/customers", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await.as_array().unwrap().len(), 1);

    let response = app
        .request(
            Method::PUT,
            &format!("/api/customers/{customer_id}"),
            Some(json!({ "firstName": "Jane", "lastName": "Doe" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = response_json(response).await;
    assert_eq!(updated["firstName"], "Jane");
    assert_eq!(updated["email"], "");
    assert_eq!(updated["id"], created["id"]);

    let response = app
        .request(Method::GET, &format!("/api/customers/{customer_id}"), None)
        .await;
    assert_eq!(response_json(response).await["firstName"], "Jane");

    let response = app
        .request(Method::DELETE, &format!("/api/customers/{customer_id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request(Method::GET, &format!("/api/customers/{customer_id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        error_message(response).await,
        format!("Customer with ID {customer_id} does not exist.")
    );
}

#[tokio::test]
async fn customers_start_empty() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/customers", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!([]));
}

#[rstest]
#[case(json!({ "firstName": "", "lastName": "Doe" }), "first_name")]
#[case(json!({ "firstName": "John", "lastName": "   " }), "last_name")]
#[tokio::test]
async fn invalid_customer_is_rejected(#[case] body: serde_json::Value, #[case] field: &str) {
    let app = TestApp::new().await;

    let response = app
        .request(Method::POST, "/api/customers", Some(body))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(error_message(response).await.contains(field));
}

#[tokio::test]
async fn missing_customer_operations_are_not_found() {
    let app = TestApp::new().await;
    let ghost = uuid::Uuid::new_v4();

    let response = app
        .request(
            Method::PUT,
            &format!("/api/customers/{ghost}"),
            Some(json!({ "firstName": "Jane", "lastName": "Doe" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request(Method::DELETE, &format!("/api/customers/{ghost}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pet_crud_round_trip() {
    let app = TestApp::new().await;

    let created = app.create_pet("Buddy", "500.00").await;
    let pet_id = id(&created);
    assert_eq!(created["name"], "Buddy");
    assert_eq!(created["kind"], "Dog");
    assert_eq!(created["ageInMonths"], 24);
    assert_eq!(decimal(&created["price"]), dec!(500.00));

    let response = app
        .request(
            Method::PUT,
            &format!("/api/pets/{pet_id}"),
            Some(json!({ "name": "Buddy", "price": "425.50", "kind": "Dog", "ageInMonths": 30 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = response_json(response).await;
    assert_eq!(decimal(&updated["price"]), dec!(425.50));
    assert_eq!(updated["ageInMonths"], 30);

    let response = app.request(Method::GET, "/api/pets", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let pets = response_json(response).await;
    assert_eq!(pets.as_array().unwrap().len(), 1);

    let response = app
        .request(Method::DELETE, &format!("/api/pets/{pet_id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request(Method::GET, &format!("/api/pets/{pet_id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        error_message(response).await,
        format!("Pet with ID {pet_id} does not exist.")
    );
}

#[rstest]
#[case(json!({ "name": "Buddy", "price": "-1.00", "kind": "Dog" }), "price")]
#[case(json!({ "name": "Buddy", "price": "10.00", "kind": "Dog", "ageInMonths": -2 }), "age_in_months")]
#[case(json!({ "name": " ", "price": "10.00", "kind": "Cat" }), "name")]
#[tokio::test]
async fn invalid_pet_is_rejected(#[case] body: serde_json::Value, #[case] field: &str) {
    let app = TestApp::new().await;

    let response = app.request(Method::POST, "/api/pets", Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(error_message(response).await.contains(field));
}

#[tokio::test]
async fn unknown_pet_kind_is_refused() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/pets",
            Some(json!({ "name": "Smaug", "price": "10.00", "kind": "Dragon" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.request(Method::GET, "/api/pets", None).await;
    assert_eq!(response_json(response).await, json!([]));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/api-docs/openapi.json", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = response_json(response).await;
    assert!(doc["paths"]["/api/orders/add-pet"].is_object());
    assert!(doc["paths"]["/api/customers/{id}"].is_object());
}

#[rstest]
#[case("/api/customers", json!({ "lastName": "Doe" }), "firstName")]
#[case("/api/pets", json!({ "name": "Buddy", "kind": "Dog" }), "price")]
#[tokio::test]
async fn incomplete_bodies_are_bad_requests(
    #[case] uri: &str,
    #[case] body: serde_json::Value,
    #[case] field: &str,
) {
    let app = TestApp::new().await;

    let response = app.request(Method::POST, uri, Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Bad Request");
    assert!(body["message"].as_str().unwrap().contains(field));
}

#[tokio::test]
async fn prices_keep_two_decimal_places() {
    let app = TestApp::new().await;

    let created = app.create_pet("Goldie", "0.10").await;
    assert_eq!(created["price"], "0.10");

    let response = app
        .request(Method::GET, &format!("/api/pets/{}", id(&created)), None)
        .await;
    assert_eq!(response_json(response).await["price"], "0.10");
}
