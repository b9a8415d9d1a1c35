use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle of a pickup order. `Delivered` is terminal.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum OrderStatus {
    #[sea_orm(string_value = "Open")]
    Open,
    #[sea_orm(string_value = "Processing")]
    Processing,
    #[sea_orm(string_value = "Delivered")]
    Delivered,
}

impl OrderStatus {
    fn rank(self) -> u8 {
        match self {
            OrderStatus::Open => 0,
            OrderStatus::Processing => 1,
            OrderStatus::Delivered => 2,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Delivered
    }

    /// Pets may only be attached or detached while the order is open.
    pub fn allows_pet_changes(self) -> bool {
        self == OrderStatus::Open
    }

    /// Forward-only: staying put or moving ahead (skipping allowed), never back,
    /// and nothing leaves `Delivered`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        !self.is_terminal() && next.rank() >= self.rank()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub pickup_date: DateTime<Utc>,
    pub status: OrderStatus,
    /// Frozen at delivery, `None` before.
    pub actual_cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id",
        on_delete = "Cascade"
    )]
    Customer,
    #[sea_orm(has_many = "super::order_pet::Entity")]
    OrderPets,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::order_pet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderPets.def()
    }
}

impl Related<super::pet::Entity> for Entity {
    fn to() -> RelationDef {
        super::order_pet::Relation::Pet.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::order_pet::Relation::Order.def().rev())
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;

        let now = Utc::now();

        if insert {
            if let ActiveValue::NotSet = active_model.created_at {
                active_model.created_at = Set(now);
            }
        }

        active_model.updated_at = Set(now);

        Ok(active_model)
    }
}
