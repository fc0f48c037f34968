//! BiteBuddy Domain Concerns

pub mod carts;
pub mod catalog;
pub mod messages;
pub mod orders;
pub mod users;
