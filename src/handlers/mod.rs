pub mod common;
pub mod customers;
pub mod orders;
pub mod pets;

use std::sync::Arc;

use crate::db::DbPool;
use crate::services::{CustomerService, OrderService, PetService};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub customers: Arc<CustomerService>,
    pub pets: Arc<PetService>,
    pub orders: Arc<OrderService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            customers: Arc::new(CustomerService::new(db_pool.clone())),
            pets: Arc::new(PetService::new(db_pool.clone())),
            orders: Arc::new(OrderService::new(db_pool)),
        }
    }
}
