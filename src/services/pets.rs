use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    dto::{PetDto, PetRequest},
    errors::ServiceError,
    repositories::PetRepository,
};

/// Service for managing the pets on offer
#[derive(Clone)]
pub struct PetService {
    pets: PetRepository,
}

impl PetService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            pets: PetRepository::new(db_pool),
        }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_pet(&self, request: PetRequest) -> Result<PetDto, ServiceError> {
        request.validate()?;

        let pet = self.pets.create(request.into_active_model()).await?;
        info!(pet_id = %pet.id, kind = %pet.kind, "Pet created");

        Ok(pet.into())
    }

    #[instrument(skip(self))]
    pub async fn get_pet(&self, id: Uuid) -> Result<Option<PetDto>, ServiceError> {
        Ok(self.pets.find_by_id(id).await?.map(PetDto::from))
    }

    #[instrument(skip(self))]
    pub async fn list_pets(&self) -> Result<Vec<PetDto>, ServiceError> {
        let pets = self.pets.find_all().await?;
        Ok(pets.into_iter().map(PetDto::from).collect())
    }

    #[instrument(skip(self, request))]
    pub async fn update_pet(
        &self,
        id: Uuid,
        request: PetRequest,
    ) -> Result<Option<PetDto>, ServiceError> {
        request.validate()?;

        let Some(existing) = self.pets.find_by_id(id).await? else {
            return Ok(None);
        };

        let updated = self.pets.update(request.apply_to(existing)).await?;
        info!(pet_id = %id, "Pet updated");

        Ok(Some(updated.into()))
    }

    /// Deletes a pet, detaching it from any orders. Returns the removed record.
    #[instrument(skip(self))]
    pub async fn delete_pet(&self, id: Uuid) -> Result<Option<PetDto>, ServiceError> {
        let Some(existing) = self.pets.find_by_id(id).await? else {
            return Ok(None);
        };

        self.pets.delete(id).await?;
        info!(pet_id = %id, "Pet deleted");

        Ok(Some(existing.into()))
    }
}
