use axum::{
    extract::{Path, State},
    response::Response,
    routing::{delete, get, post},
    Router,
};
use uuid::Uuid;

use super::common::{ApiJson, created_response, found_or, success_response};
use crate::dto::{CreateOrderRequest, OrderDto, OrderPetRequest, UpdateOrderRequest};
use crate::errors::ServiceError;
use crate::AppState;

fn missing(id: Uuid) -> String {
    format!("Order with ID {} does not exist.", id)
}

#[utoipa::path(
    get,
    path = "/api/orders",
    summary = "List orders",
    description = "Every order with its pets. Responds 404 when there are none.",
    responses(
        (status = 200, description = "All orders", body = [OrderDto]),
        (status = 404, description = "No orders exist", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn list_orders(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let orders = state.services.orders.list_orders().await?;
    if orders.is_empty() {
        return Err(ServiceError::NotFound("No orders found.".to_string()));
    }
    Ok(success_response(orders))
}

#[utoipa::path(
    get,
    path = "/api/orders/customer/{customer_id}",
    summary = "List a customer's orders",
    params(("customer_id" = Uuid, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "The customer's orders, possibly none", body = [OrderDto]),
        (status = 400, description = "Unknown customer", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn list_customer_orders(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let orders = state
        .services
        .orders
        .list_orders_for_customer(customer_id)
        .await?;
    Ok(success_response(orders))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    summary = "Get order",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order found", body = OrderDto),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let order = state.services.orders.get_order(id).await?;
    Ok(success_response(found_or(order, || missing(id))?))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    summary = "Create order",
    description = "Opens an empty order for an existing customer",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderDto),
        (status = 400, description = "Unknown customer or pickup date in the past", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateOrderRequest>,
) -> Result<Response, ServiceError> {
    let order = state.services.orders.create_order(request).await?;
    Ok(created_response(order))
}

#[utoipa::path(
    post,
    path = "/api/orders/add-pet",
    summary = "Add pet to order",
    request_body = OrderPetRequest,
    responses(
        (status = 201, description = "Pet added; the refreshed order", body = OrderDto),
        (status = 400, description = "Order not open, pet already added or unknown", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn add_pet_to_order(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<OrderPetRequest>,
) -> Result<Response, ServiceError> {
    let order = state.services.orders.add_pet_to_order(request).await?;
    Ok(created_response(order))
}

#[utoipa::path(
    delete,
    path = "/api/orders/remove-pet",
    summary = "Remove pet from order",
    request_body = OrderPetRequest,
    responses(
        (status = 200, description = "Pet removed; the refreshed order", body = OrderDto),
        (status = 400, description = "Pet not in order or order not open", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn remove_pet_from_order(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<OrderPetRequest>,
) -> Result<Response, ServiceError> {
    let order = state.services.orders.remove_pet_from_order(request).await?;
    Ok(success_response(order))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    summary = "Update order",
    description = "Reschedules pickup and/or advances status. Delivering freezes the cost.",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderDto),
        (status = 400, description = "Transition not allowed", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateOrderRequest>,
) -> Result<Response, ServiceError> {
    let order = state.services.orders.update_order(id, request).await?;
    Ok(success_response(found_or(order, || missing(id))?))
}

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/add-pet", post(add_pet_to_order))
        .route("/remove-pet", delete(remove_pet_from_order))
        .route("/customer/:customer_id", get(list_customer_orders))
        .route("/:id", get(get_order).put(update_order))
}
