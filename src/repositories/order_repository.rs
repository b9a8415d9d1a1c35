use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::order::{
    ActiveModel as OrderActiveModel, Column, Entity as Order, Model as OrderModel,
};
use crate::entities::order_pet::{
    self, ActiveModel as OrderPetActiveModel, Entity as OrderPet, Model as OrderPetModel,
};
use crate::entities::pet::{Entity as Pet, Model as PetModel};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

/// An order together with the pets currently linked to it.
pub type OrderWithPets = (OrderModel, Vec<PetModel>);

/// Repository for order operations
#[derive(Debug, Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find an order by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<OrderModel>, ServiceError> {
        Order::find_by_id(id)
            .one(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Find an order with its pets eagerly loaded
    pub async fn find_with_pets(&self, id: Uuid) -> Result<Option<OrderWithPets>, ServiceError> {
        let Some(order) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let pets = order
            .find_related(Pet)
            .order_by_asc(order_pet::Column::CreatedAt)
            .all(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok(Some((order, pets)))
    }

    /// Every order with its pets, oldest first
    pub async fn find_all_with_pets(&self) -> Result<Vec<OrderWithPets>, ServiceError> {
        let orders = Order::find()
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)?;

        self.attach_pets(orders).await
    }

    /// Orders placed by one customer, with pets
    pub async fn find_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<OrderWithPets>, ServiceError> {
        let orders = Order::find()
            .filter(Column::CustomerId.eq(customer_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)?;

        self.attach_pets(orders).await
    }

    async fn attach_pets(&self, orders: Vec<OrderModel>) -> Result<Vec<OrderWithPets>, ServiceError> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();

        let links = OrderPet::find()
            .filter(order_pet::Column::OrderId.is_in(order_ids))
            .order_by_asc(order_pet::Column::CreatedAt)
            .find_also_related(Pet)
            .all(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)?;

        let mut pets_by_order: HashMap<Uuid, Vec<PetModel>> = HashMap::new();
        for (link, pet) in links {
            if let Some(pet) = pet {
                pets_by_order.entry(link.order_id).or_default().push(pet);
            }
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let pets = pets_by_order.remove(&order.id).unwrap_or_default();
                (order, pets)
            })
            .collect())
    }

    /// Create a new order
    pub async fn create(&self, order: OrderActiveModel) -> Result<OrderModel, ServiceError> {
        order
            .insert(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Persist changed columns of an existing order
    pub async fn update(&self, order: OrderActiveModel) -> Result<OrderModel, ServiceError> {
        order
            .update(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Look up the link between an order and a pet
    pub async fn find_order_pet(
        &self,
        order_id: Uuid,
        pet_id: Uuid,
    ) -> Result<Option<OrderPetModel>, ServiceError> {
        OrderPet::find()
            .filter(order_pet::Column::OrderId.eq(order_id))
            .filter(order_pet::Column::PetId.eq(pet_id))
            .one(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Link a pet to an order
    pub async fn add_order_pet(
        &self,
        order_id: Uuid,
        pet_id: Uuid,
    ) -> Result<OrderPetModel, ServiceError> {
        OrderPetActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order_id),
            pet_id: Set(pet_id),
            created_at: Set(Utc::now()),
        }
        .insert(self.base.get_db())
        .await
        .map_err(ServiceError::DatabaseError)
    }

    /// Unlink a pet from an order
    pub async fn remove_order_pet(&self, link: OrderPetModel) -> Result<(), ServiceError> {
        link.delete(self.base.get_db())
            .await
            .map(|_| ())
            .map_err(ServiceError::DatabaseError)
    }
}

impl Repository for OrderRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
