//! Carts service errors.

use sqlx::{
    Error,
    error::ErrorKind,
};
use thiserror::Error;

use crate::domain::{carts::data::MAX_LINE_QUANTITY, catalog::pricing::PricingError};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart line or catalog item not found")]
    NotFound,

    #[error("cart line refers to a user or catalog item that does not exist")]
    InvalidReference,

    #[error("cart line is missing a required field")]
    MissingRequiredData,

    #[error("cart line was rejected by a table constraint")]
    InvalidData,

    #[error("quantity must be between 1 and {}", MAX_LINE_QUANTITY)]
    InvalidQuantity,

    #[error("invalid pricing: {0}")]
    InvalidPricing(#[from] PricingError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let Some(database_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        match database_error.kind() {
            ErrorKind::ForeignKeyViolation => Self::InvalidReference,
            ErrorKind::NotNullViolation => Self::MissingRequiredData,
            ErrorKind::CheckViolation
                if database_error
                    .constraint()
                    .is_some_and(|name| name.contains("quantity")) =>
            {
                Self::InvalidQuantity
            }
            ErrorKind::CheckViolation => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
