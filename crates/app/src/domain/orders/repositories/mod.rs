//! Orders Repositories

mod items;
mod orders;

pub(crate) use items::PgOrderItemsRepository;
pub(crate) use orders::{NewOrder, PgOrdersRepository};
