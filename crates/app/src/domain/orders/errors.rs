//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    catalog::{
        pricing::PricingError,
        records::{CatalogItemUuid, ItemKind},
    },
    orders::records::OrderStatus,
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("{item_kind} {item_uuid} is no longer available")]
    StaleItem {
        item_kind: ItemKind,
        item_uuid: CatalogItemUuid,
    },

    #[error("invalid pricing: {0}")]
    InvalidPricing(#[from] PricingError),

    #[error("no delivery address given and none saved on the account")]
    MissingDeliveryAddress,

    #[error("delivery coordinates are invalid")]
    InvalidDeliveryLocation,

    #[error("order not found")]
    NotFound,

    #[error("cannot move order from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    #[error("checkout failed")]
    CheckoutFailed(#[source] Error),

    #[error("order refers to a record that does not exist")]
    InvalidReference,

    #[error("order is missing a required field")]
    MissingRequiredData,

    #[error("order was rejected by a table constraint")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::UniqueViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
