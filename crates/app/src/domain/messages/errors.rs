//! Messages service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessagesServiceError {
    #[error("message not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for MessagesServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            error => Self::Sql(error),
        }
    }
}
