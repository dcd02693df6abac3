//! Domain models

pub mod book;
pub mod patron;
pub mod ticket;

pub use book::Book;
pub use patron::Patron;
pub use ticket::{LendingTicket, PaymentStatus};
