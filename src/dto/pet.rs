use rust_decimal::Decimal;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::entities::pet::{self, PetKind};

use super::validate_not_blank;

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut err = ValidationError::new("price");
        err.message = Some("Price must not be negative".into());
        return Err(err);
    }
    Ok(())
}

/// Body for creating or replacing a pet
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    #[schema(example = "Buddy")]
    pub name: String,

    #[validate(custom = "validate_price")]
    #[schema(value_type = String, example = "500.00")]
    pub price: Decimal,

    pub kind: PetKind,

    #[serde(default)]
    #[validate(length(max = 50))]
    pub color: String,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub breed: String,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub age_in_months: i32,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
}

impl PetRequest {
    pub fn into_active_model(self) -> pet::ActiveModel {
        pet::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(self.name),
            price: Set(self.price),
            kind: Set(self.kind),
            color: Set(self.color),
            breed: Set(self.breed),
            age_in_months: Set(self.age_in_months),
            description: Set(self.description),
        }
    }

    pub fn apply_to(self, model: pet::Model) -> pet::ActiveModel {
        let mut active: pet::ActiveModel = model.into();
        active.name = Set(self.name);
        active.price = Set(self.price);
        active.kind = Set(self.kind);
        active.color = Set(self.color);
        active.breed = Set(self.breed);
        active.age_in_months = Set(self.age_in_months);
        active.description = Set(self.description);
        active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetDto {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = String, example = "500.00")]
    pub price: Decimal,
    pub kind: PetKind,
    pub color: String,
    pub breed: String,
    pub age_in_months: i32,
    pub description: String,
}

impl From<pet::Model> for PetDto {
    fn from(model: pet::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: super::money(model.price),
            kind: model.kind,
            color: model.color,
            breed: model.breed,
            age_in_months: model.age_in_months,
            description: model.description,
        }
    }
}
