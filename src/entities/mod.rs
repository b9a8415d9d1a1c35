pub mod customer;
pub mod order;
pub mod order_pet;
pub mod pet;

pub use order::OrderStatus;
pub use pet::PetKind;
