//! Users service errors.

use argon2::password_hash::Error as PasswordHashError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::users::validation::RegistrationError;

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("mobile number or email already registered")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error("invalid mobile number or password")]
    InvalidCredentials,

    #[error(transparent)]
    InvalidRegistration(#[from] RegistrationError),

    #[error("user refers to a record that does not exist")]
    InvalidReference,

    #[error("user is missing a required field")]
    MissingRequiredData,

    #[error("user was rejected by a table constraint")]
    InvalidData,

    #[error("password hashing failed")]
    PasswordHash(#[source] PasswordHashError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<PasswordHashError> for UsersServiceError {
    fn from(error: PasswordHashError) -> Self {
        Self::PasswordHash(error)
    }
}
