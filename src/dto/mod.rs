//! Request and response shapes for the HTTP API, kept apart from the
//! persisted entity models.

use rust_decimal::Decimal;
use validator::ValidationError;

pub mod customer;
pub mod order;
pub mod pet;

pub use customer::{CustomerDto, CustomerRequest};
pub use order::{CreateOrderRequest, OrderDto, OrderPetRequest, UpdateOrderRequest};
pub use pet::{PetDto, PetRequest};

/// Amounts leave the API with exactly two decimal places; SQLite hands
/// decimals back as floats and drops trailing zeros.
pub fn money(amount: Decimal) -> Decimal {
    let mut amount = amount.round_dp(2);
    amount.rescale(2);
    amount
}

/// Rejects strings that are empty once trimmed.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}
