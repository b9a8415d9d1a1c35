pub mod customers;
pub mod orders;
pub mod pets;

pub use customers::CustomerService;
pub use orders::OrderService;
pub use pets::PetService;
