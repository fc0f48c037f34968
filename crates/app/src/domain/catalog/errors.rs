//! Catalog service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::catalog::pricing::PricingError;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("a catalog item with that identity already exists")]
    AlreadyExists,

    #[error("no live catalog item matches")]
    NotFound,

    #[error("service item refers to a service that does not exist")]
    InvalidReference,

    #[error("catalog item is missing a required field")]
    MissingRequiredData,

    #[error("catalog item breaks a naming, kind or price rule")]
    InvalidData,

    #[error("invalid pricing: {0}")]
    InvalidPricing(#[from] PricingError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CatalogServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
