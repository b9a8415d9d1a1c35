use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PetShop API",
        version = "0.1.0",
        description = r#"
# PetShop Order Management API

Customers, the pets on offer, and pickup orders that tie them together.

## Order lifecycle

Orders start `Open`, may move to `Processing`, and finish `Delivered`.
Pets can only be added to or removed from an `Open` order. Delivering an
order freezes its cost at the sum of its pets' prices.

## Error Handling

Failures use a single body shape with the HTTP status reason and a message:

```json
{
  "error": "Bad Request",
  "message": "Pickup date must be today or in the future.",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Customers", description = "Customer records"),
        (name = "Pets", description = "Pets available for sale"),
        (name = "Orders", description = "Pickup orders and their lifecycle")
    ),
    paths(
        // Customers
        crate::handlers::customers::list_customers,
        crate::handlers::customers::get_customer,
        crate::handlers::customers::create_customer,
        crate::handlers::customers::update_customer,
        crate::handlers::customers::delete_customer,

        // Pets
        crate::handlers::pets::list_pets,
        crate::handlers::pets::get_pet,
        crate::handlers::pets::create_pet,
        crate::handlers::pets::update_pet,
        crate::handlers::pets::delete_pet,

        // Orders
        crate::handlers::orders::list_orders,
        crate::handlers::orders::list_customer_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::create_order,
        crate::handlers::orders::add_pet_to_order,
        crate::handlers::orders::remove_pet_from_order,
        crate::handlers::orders::update_order,
    ),
    components(
        schemas(
            crate::dto::CustomerDto,
            crate::dto::CustomerRequest,
            crate::dto::PetDto,
            crate::dto::PetRequest,
            crate::entities::PetKind,
            crate::dto::OrderDto,
            crate::dto::CreateOrderRequest,
            crate::dto::UpdateOrderRequest,
            crate::dto::OrderPetRequest,
            crate::entities::OrderStatus,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let json = serde_json::to_string_pretty(&ApiDoc::openapi()).unwrap();
        assert!(json.contains("PetShop API"));
        for path in [
            "/api/customers/{id}",
            "/api/pets",
            "/api/orders/add-pet",
            "/api/orders/remove-pet",
            "/api/orders/customer/{customer_id}",
        ] {
            assert!(json.contains(path), "missing {path}");
        }
    }

    #[test]
    fn order_schema_uses_camel_case() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();
        assert!(json.contains("estimatedCost"));
        assert!(json.contains("customerName"));
    }
}
