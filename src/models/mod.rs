pub mod customer;
pub mod section;
pub mod ticket;

pub use customer::Customer;
pub use section::Section;
pub use ticket::{SeatedCustomer, TicketRecord};
