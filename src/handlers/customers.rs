use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};
use uuid::Uuid;

use super::common::{ApiJson, created_response, found_or, no_content_response, success_response};
use crate::dto::{CustomerDto, CustomerRequest};
use crate::errors::ServiceError;
use crate::AppState;

fn missing(id: Uuid) -> String {
    format!("Customer with ID {} does not exist.", id)
}

#[utoipa::path(
    get,
    path = "/api/customers",
    summary = "List customers",
    responses(
        (status = 200, description = "All customers", body = [CustomerDto]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    ),
    tag = "Customers"
)]
pub async fn list_customers(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let customers = state.services.customers.list_customers().await?;
    Ok(success_response(customers))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    summary = "Get customer",
    params(("id" = Uuid, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer found", body = CustomerDto),
        (status = 404, description = "Customer not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let customer = state.services.customers.get_customer(id).await?;
    Ok(success_response(found_or(customer, || missing(id))?))
}

#[utoipa::path(
    post,
    path = "/api/customers",
    summary = "Create customer",
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerDto),
        (status = 400, description = "Invalid customer", body = crate::errors::ErrorResponse),
    ),
    tag = "Customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CustomerRequest>,
) -> Result<Response, ServiceError> {
    let customer = state.services.customers.create_customer(request).await?;
    Ok(created_response(customer))
}

#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    summary = "Update customer",
    params(("id" = Uuid, Path, description = "Customer ID")),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerDto),
        (status = 400, description = "Invalid customer", body = crate::errors::ErrorResponse),
        (status = 404, description = "Customer not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<CustomerRequest>,
) -> Result<Response, ServiceError> {
    let customer = state.services.customers.update_customer(id, request).await?;
    Ok(success_response(found_or(customer, || missing(id))?))
}

#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    summary = "Delete customer",
    description = "Deletes the customer together with all of their orders",
    params(("id" = Uuid, Path, description = "Customer ID")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "Customer not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Customers"
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let removed = state.services.customers.delete_customer(id).await?;
    found_or(removed, || missing(id))?;
    Ok(no_content_response())
}

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}
