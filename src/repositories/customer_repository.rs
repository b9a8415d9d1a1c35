use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::customer::{
    ActiveModel as CustomerActiveModel, Column, Entity as Customer, Model as CustomerModel,
};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

/// Repository for customer operations
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a customer by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CustomerModel>, ServiceError> {
        Customer::find_by_id(id)
            .one(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Customers keyed by id, for echoing names on orders
    pub async fn find_by_ids(
        &self,
        ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, CustomerModel>, ServiceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let customers = Customer::find()
            .filter(Column::Id.is_in(ids))
            .all(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok(customers.into_iter().map(|c| (c.id, c)).collect())
    }

    /// All customers, oldest first
    pub async fn find_all(&self) -> Result<Vec<CustomerModel>, ServiceError> {
        Customer::find()
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Create a new customer
    pub async fn create(&self, customer: CustomerActiveModel) -> Result<CustomerModel, ServiceError> {
        customer
            .insert(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Persist changed columns of an existing customer
    pub async fn update(&self, customer: CustomerActiveModel) -> Result<CustomerModel, ServiceError> {
        customer
            .update(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Delete a customer; their orders go with them
    pub async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        Customer::delete_by_id(id)
            .exec(self.base.get_db())
            .await
            .map(|res| res.rows_affected)
            .map_err(ServiceError::DatabaseError)
    }
}

impl Repository for CustomerRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
