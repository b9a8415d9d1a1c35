use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    dto::{CustomerDto, CustomerRequest},
    errors::ServiceError,
    repositories::CustomerRepository,
};

/// Service for managing customers
#[derive(Clone)]
pub struct CustomerService {
    customers: CustomerRepository,
}

impl CustomerService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            customers: CustomerRepository::new(db_pool),
        }
    }

    #[instrument(skip(self, request))]
    pub async fn create_customer(
        &self,
        request: CustomerRequest,
    ) -> Result<CustomerDto, ServiceError> {
        request.validate()?;

        let customer = self.customers.create(request.into_active_model()).await?;
        info!(customer_id = %customer.id, "Customer created");

        Ok(customer.into())
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: Uuid) -> Result<Option<CustomerDto>, ServiceError> {
        Ok(self.customers.find_by_id(id).await?.map(CustomerDto::from))
    }

    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<CustomerDto>, ServiceError> {
        let customers = self.customers.find_all().await?;
        Ok(customers.into_iter().map(CustomerDto::from).collect())
    }

    /// Replaces a customer's details; `None` when no such customer exists.
    #[instrument(skip(self, request))]
    pub async fn update_customer(
        &self,
        id: Uuid,
        request: CustomerRequest,
    ) -> Result<Option<CustomerDto>, ServiceError> {
        request.validate()?;

        let Some(existing) = self.customers.find_by_id(id).await? else {
            info!(customer_id = %id, "Customer not found for update");
            return Ok(None);
        };

        let updated = self.customers.update(request.apply_to(existing)).await?;
        info!(customer_id = %id, "Customer updated");

        Ok(Some(updated.into()))
    }

    /// Deletes a customer and, by cascade, their orders. Returns the removed record.
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: Uuid) -> Result<Option<CustomerDto>, ServiceError> {
        let Some(existing) = self.customers.find_by_id(id).await? else {
            return Ok(None);
        };

        self.customers.delete(id).await?;
        info!(customer_id = %id, "Customer deleted");

        Ok(Some(existing.into()))
    }
}
