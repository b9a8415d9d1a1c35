use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use metrics::counter;
use sea_orm::Set;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    dto::{
        money, order::pets_total, CreateOrderRequest, OrderDto, OrderPetRequest, UpdateOrderRequest,
    },
    entities::order::{self, OrderStatus},
    errors::ServiceError,
    repositories::{CustomerRepository, OrderRepository, OrderWithPets, PetRepository},
};

/// Pickup dates are compared by UTC calendar day; any time today is accepted.
pub fn validate_pickup_date(pickup: DateTime<Utc>, today: NaiveDate) -> Result<(), ServiceError> {
    if pickup.date_naive() < today {
        return Err(ServiceError::ValidationError(
            "Pickup date must be today or in the future.".to_string(),
        ));
    }
    Ok(())
}

fn rejected(message: String) -> ServiceError {
    warn!(reason = %message, "Order request rejected");
    counter!("petshop_orders.rejected", 1);
    ServiceError::ValidationError(message)
}

/// Pickup date guard with the same logging and metrics as the other rejections.
fn check_pickup_date(pickup: DateTime<Utc>, today: NaiveDate) -> Result<(), ServiceError> {
    validate_pickup_date(pickup, today).map_err(|e| match e {
        ServiceError::ValidationError(message) => {
            warn!(pickup_date = %pickup, "Pickup date in the past");
            rejected(message)
        }
        other => other,
    })
}

/// Service owning the order lifecycle: Open, then Processing, then Delivered.
#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    customers: CustomerRepository,
    pets: PetRepository,
}

impl OrderService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            orders: OrderRepository::new(db_pool.clone()),
            customers: CustomerRepository::new(db_pool.clone()),
            pets: PetRepository::new(db_pool),
        }
    }

    /// Opens a new, empty order for an existing customer.
    #[instrument(skip(self, request), fields(customer_id = %request.customer_id))]
    pub async fn create_order(&self, request: CreateOrderRequest) -> Result<OrderDto, ServiceError> {
        request.validate()?;

        let customer = self
            .customers
            .find_by_id(request.customer_id)
            .await?
            .ok_or_else(|| {
                rejected(format!(
                    "Customer with ID {} does not exist.",
                    request.customer_id
                ))
            })?;

        check_pickup_date(request.pickup_date, Utc::now().date_naive())?;

        let now = Utc::now();
        let order = self
            .orders
            .create(order::ActiveModel {
                id: Set(Uuid::new_v4()),
                customer_id: Set(customer.id),
                pickup_date: Set(request.pickup_date),
                status: Set(OrderStatus::Open),
                actual_cost: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .await
            .map_err(|e| {
                error!(error = %e, customer_id = %customer.id, "Failed to create order");
                e
            })?;

        info!(order_id = %order.id, customer_id = %customer.id, "Order created");
        counter!("petshop_orders.created", 1);

        Ok(OrderDto::from_parts(order, customer.display_name(), Vec::new()))
    }

    /// Attaches a pet to an open order.
    #[instrument(skip(self, request), fields(order_id = %request.order_id, pet_id = %request.pet_id))]
    pub async fn add_pet_to_order(&self, request: OrderPetRequest) -> Result<OrderDto, ServiceError> {
        let OrderPetRequest { order_id, pet_id } = request;

        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| rejected(format!("Order with ID {} does not exist.", order_id)))?;

        if !order.status.allows_pet_changes() {
            return Err(rejected(format!(
                "Cannot add pet to order with ID {} because it is not open.",
                order_id
            )));
        }

        if self.orders.find_order_pet(order_id, pet_id).await?.is_some() {
            return Err(rejected(format!(
                "Pet with ID {} is already added to the order.",
                pet_id
            )));
        }

        if self.pets.find_by_id(pet_id).await?.is_none() {
            return Err(rejected(format!("Pet with ID {} does not exist.", pet_id)));
        }

        self.orders.add_order_pet(order_id, pet_id).await?;
        info!(order_id = %order_id, pet_id = %pet_id, "Pet added to order");

        self.reload(order_id).await
    }

    /// Detaches a pet from an open order.
    #[instrument(skip(self, request), fields(order_id = %request.order_id, pet_id = %request.pet_id))]
    pub async fn remove_pet_from_order(
        &self,
        request: OrderPetRequest,
    ) -> Result<OrderDto, ServiceError> {
        let OrderPetRequest { order_id, pet_id } = request;

        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| rejected(format!("Order with ID {} does not exist.", order_id)))?;

        // Membership is checked before status.
        let link = self
            .orders
            .find_order_pet(order_id, pet_id)
            .await?
            .ok_or_else(|| rejected(format!("Pet with ID {} is not in the order.", pet_id)))?;

        if !order.status.allows_pet_changes() {
            return Err(rejected(format!(
                "Cannot remove pet from order with ID {} because it is not open.",
                order_id
            )));
        }

        self.orders.remove_order_pet(link).await?;
        info!(order_id = %order_id, pet_id = %pet_id, "Pet removed from order");

        self.reload(order_id).await
    }

    /// Moves an order forward and/or reschedules its pickup. `None` when the
    /// order does not exist.
    #[instrument(skip(self, request), fields(order_id = %id))]
    pub async fn update_order(
        &self,
        id: Uuid,
        request: UpdateOrderRequest,
    ) -> Result<Option<OrderDto>, ServiceError> {
        request.validate()?;

        let Some((order, pets)) = self.orders.find_with_pets(id).await? else {
            info!(order_id = %id, "Order not found for update");
            return Ok(None);
        };

        if let Some(pickup_date) = request.pickup_date {
            check_pickup_date(pickup_date, Utc::now().date_naive())?;
        }

        if request.status == Some(OrderStatus::Delivered) && request.pickup_date.is_some() {
            return Err(rejected(
                "Cannot set pickup date when status is Delivered.".to_string(),
            ));
        }

        if order.status.is_terminal() {
            return Err(rejected(format!(
                "Cannot update order with ID {} because it is Delivered.",
                id
            )));
        }

        if let Some(next) = request.status {
            if !order.status.can_transition_to(next) {
                return Err(rejected(format!(
                    "Cannot move order with ID {} from {} back to {}.",
                    id, order.status, next
                )));
            }

            if next == OrderStatus::Delivered && pets.is_empty() {
                return Err(rejected(format!(
                    "Cannot set order with ID {} to Delivered because it has no pets.",
                    id
                )));
            }
        }

        let previous = order.status;
        let mut active: order::ActiveModel = order.into();

        if let Some(pickup_date) = request.pickup_date {
            active.pickup_date = Set(pickup_date);
        }

        if let Some(next) = request.status {
            active.status = Set(next);
            if next == OrderStatus::Delivered {
                let total = money(pets_total(&pets));
                active.actual_cost = Set(Some(total));
                info!(order_id = %id, actual_cost = %total, "Order delivered; cost frozen");
                counter!("petshop_orders.delivered", 1);
            }
        }

        let updated = self.orders.update(active).await?;
        info!(order_id = %id, from = %previous, to = %updated.status, "Order updated");

        let customer_name = self.customer_name(updated.customer_id).await?;
        Ok(Some(OrderDto::from_parts(updated, customer_name, pets)))
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: Uuid) -> Result<Option<OrderDto>, ServiceError> {
        match self.orders.find_with_pets(id).await? {
            Some((order, pets)) => {
                let customer_name = self.customer_name(order.customer_id).await?;
                Ok(Some(OrderDto::from_parts(order, customer_name, pets)))
            }
            None => {
                info!(order_id = %id, "Order not found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<OrderDto>, ServiceError> {
        let orders = self.orders.find_all_with_pets().await?;
        self.to_dtos(orders).await
    }

    /// Orders for one customer; the customer itself must exist.
    #[instrument(skip(self))]
    pub async fn list_orders_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<OrderDto>, ServiceError> {
        if self.customers.find_by_id(customer_id).await?.is_none() {
            return Err(rejected(format!(
                "Customer with ID {} does not exist.",
                customer_id
            )));
        }

        let orders = self.orders.find_by_customer(customer_id).await?;
        self.to_dtos(orders).await
    }

    async fn reload(&self, id: Uuid) -> Result<OrderDto, ServiceError> {
        self.get_order(id).await?.ok_or_else(|| {
            error!(order_id = %id, "Order vanished while being modified");
            ServiceError::InternalError(format!("Order with ID {} could not be reloaded", id))
        })
    }

    async fn customer_name(&self, customer_id: Uuid) -> Result<String, ServiceError> {
        Ok(self
            .customers
            .find_by_id(customer_id)
            .await?
            .map(|c| c.display_name())
            .unwrap_or_default())
    }

    async fn to_dtos(&self, orders: Vec<OrderWithPets>) -> Result<Vec<OrderDto>, ServiceError> {
        let customer_ids = orders.iter().map(|(o, _)| o.customer_id).collect();
        let customers = self.customers.find_by_ids(customer_ids).await?;

        Ok(orders
            .into_iter()
            .map(|(order, pets)| {
                let name = customers
                    .get(&order.customer_id)
                    .map(|c| c.display_name())
                    .unwrap_or_default();
                OrderDto::from_parts(order, name, pets)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn pickup_today_is_accepted_at_any_hour() {
        let early = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 1).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 6, 15, 23, 59, 59).unwrap();
        assert!(validate_pickup_date(early, today()).is_ok());
        assert!(validate_pickup_date(late, today()).is_ok());
    }

    #[test]
    fn pickup_in_the_future_is_accepted() {
        let next_week = Utc.with_ymd_and_hms(2024, 6, 22, 12, 0, 0).unwrap();
        assert!(validate_pickup_date(next_week, today()).is_ok());
    }

    #[test]
    fn pickup_yesterday_is_rejected() {
        let yesterday = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap() - Duration::days(1);
        assert_matches!(
            validate_pickup_date(yesterday, today()),
            Err(ServiceError::ValidationError(msg)) if msg == "Pickup date must be today or in the future."
        );
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn past_pickup_goes_through_the_rejection_path() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let yesterday = Utc.with_ymd_and_hms(2024, 6, 14, 9, 0, 0).unwrap();
        let result = tracing::subscriber::with_default(subscriber, || {
            check_pickup_date(yesterday, today())
        });

        assert_matches!(
            result,
            Err(ServiceError::ValidationError(msg)) if msg == "Pickup date must be today or in the future."
        );
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Order request rejected"), "{output}");
        assert!(output.contains("Pickup date in the past"), "{output}");
    }

    #[test]
    fn valid_pickup_logs_nothing() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();

        let noon = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let result =
            tracing::subscriber::with_default(subscriber, || check_pickup_date(noon, today()));

        assert!(result.is_ok());
        assert!(logs.0.lock().unwrap().is_empty());
    }
}
