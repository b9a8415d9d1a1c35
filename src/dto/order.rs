use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::order::{self, OrderStatus};
use crate::entities::pet;

use super::PetDto;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    /// Must be today or later (UTC calendar date).
    pub pickup_date: DateTime<Utc>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub pickup_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

/// Identifies one pet within one order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderPetRequest {
    pub order_id: Uuid,
    pub pet_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub pickup_date: DateTime<Utc>,
    pub status: OrderStatus,
    #[schema(value_type = String, example = "800.00")]
    pub cost: Decimal,
    #[schema(value_type = String, example = "800.00")]
    pub estimated_cost: Decimal,
    pub pets: Vec<PetDto>,
}

/// Sum of the prices of the given pets.
pub fn pets_total(pets: &[pet::Model]) -> Decimal {
    pets.iter().map(|p| p.price).sum()
}

/// Cost reported for an order: the frozen amount once delivered, otherwise
/// the live total of its pets.
pub fn order_cost(order: &order::Model, pets: &[pet::Model]) -> Decimal {
    match (order.status, order.actual_cost) {
        (OrderStatus::Delivered, Some(actual)) => actual,
        _ => pets_total(pets),
    }
}

impl OrderDto {
    pub fn from_parts(order: order::Model, customer_name: String, pets: Vec<pet::Model>) -> Self {
        let cost = super::money(order_cost(&order, &pets));

        Self {
            id: order.id,
            customer_id: order.customer_id,
            customer_name,
            pickup_date: order.pickup_date,
            status: order.status,
            cost,
            estimated_cost: cost,
            pets: pets.into_iter().map(PetDto::from).collect(),
        }
    }
}
