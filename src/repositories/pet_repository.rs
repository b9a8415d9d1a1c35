use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::pet::{ActiveModel as PetActiveModel, Column, Entity as Pet, Model as PetModel};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

/// Repository for pet operations
#[derive(Debug, Clone)]
pub struct PetRepository {
    base: BaseRepository,
}

impl PetRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a pet by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PetModel>, ServiceError> {
        Pet::find_by_id(id)
            .one(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    pub async fn find_all(&self) -> Result<Vec<PetModel>, ServiceError> {
        Pet::find()
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Create a new pet
    pub async fn create(&self, pet: PetActiveModel) -> Result<PetModel, ServiceError> {
        pet.insert(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Persist changed columns of an existing pet
    pub async fn update(&self, pet: PetActiveModel) -> Result<PetModel, ServiceError> {
        pet.update(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Delete a pet; it drops out of every order it was linked to
    pub async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        Pet::delete_by_id(id)
            .exec(self.base.get_db())
            .await
            .map(|res| res.rows_affected)
            .map_err(ServiceError::DatabaseError)
    }
}

impl Repository for PetRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
