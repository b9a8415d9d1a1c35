use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Kind of animal offered for sale.
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
pub enum PetKind {
    #[sea_orm(string_value = "Dog")]
    Dog,
    #[sea_orm(string_value = "Cat")]
    Cat,
    #[sea_orm(string_value = "Bird")]
    Bird,
    #[sea_orm(string_value = "Fish")]
    Fish,
    #[sea_orm(string_value = "Rabbit")]
    Rabbit,
    #[sea_orm(string_value = "Hamster")]
    Hamster,
    #[sea_orm(string_value = "GuineaPig")]
    GuineaPig,
    #[sea_orm(string_value = "Reptile")]
    Reptile,
    #[sea_orm(string_value = "Other")]
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub kind: PetKind,
    pub color: String,
    pub breed: String,
    pub age_in_months: i32,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_pet::Entity")]
    OrderPets,
}

impl Related<super::order_pet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderPets.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        super::order_pet::Relation::Order.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::order_pet::Relation::Pet.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
