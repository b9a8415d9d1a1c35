use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::customer;

use super::validate_not_blank;

/// Body for creating or replacing a customer
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    #[schema(example = "John")]
    pub first_name: String,

    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    #[schema(example = "Doe")]
    pub last_name: String,

    #[serde(default)]
    #[validate(length(max = 255))]
    #[schema(example = "john.doe@example.com")]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 50))]
    pub phone: String,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub address: String,
}

impl CustomerRequest {
    pub fn into_active_model(self) -> customer::ActiveModel {
        customer::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            email: Set(self.email),
            phone: Set(self.phone),
            address: Set(self.address),
            created_at: Set(Utc::now()),
        }
    }

    /// Overwrites the updatable columns; id and creation time stay put.
    pub fn apply_to(self, model: customer::Model) -> customer::ActiveModel {
        let mut active: customer::ActiveModel = model.into();
        active.first_name = Set(self.first_name);
        active.last_name = Set(self.last_name);
        active.email = Set(self.email);
        active.phone = Set(self.phone);
        active.address = Set(self.address);
        active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_date: DateTime<Utc>,
}

impl From<customer::Model> for CustomerDto {
    fn from(model: customer::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            address: model.address,
            created_date: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;
    use serde_json::json;

    fn request() -> CustomerRequest {
        serde_json::from_value(json!({"firstName": "John", "lastName": "Doe"})).unwrap()
    }

    #[test]
    fn contact_fields_default_to_empty() {
        let req = request();
        assert_eq!(req.email, "");
        assert_eq!(req.phone, "");
        assert_eq!(req.address, "");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn blank_last_name_fails_validation() {
        let mut req = request();
        req.last_name = "  ".into();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("last_name"));
    }

    #[test]
    fn apply_keeps_identity_and_creation_time() {
        let created = Utc::now();
        let model = customer::Model {
            id: Uuid::new_v4(),
            first_name: "Jane".into(),
            last_name: "Roe".into(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            created_at: created,
        };
        let id = model.id;

        let active = request().apply_to(model);

        assert_eq!(active.id, ActiveValue::Unchanged(id));
        assert_eq!(active.created_at, ActiveValue::Unchanged(created));
        assert_eq!(active.first_name, ActiveValue::Set("John".to_string()));
    }

    #[test]
    fn dto_serializes_camel_case() {
        let dto = CustomerDto {
            id: Uuid::nil(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            created_date: Utc::now(),
        };
        let value = serde_json::to_value(dto).unwrap();
        assert_eq!(value["firstName"], "John");
        assert!(value.get("createdDate").is_some());
    }
}
