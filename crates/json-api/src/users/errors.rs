//! User Errors

use salvo::http::StatusError;
use tracing::error;

use bitebuddy_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Mobile number or email already registered")
        }
        UsersServiceError::InvalidRegistration(reason) => {
            StatusError::bad_request().brief(reason.to_string())
        }
        UsersServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid mobile number or password")
        }
        UsersServiceError::NotFound => StatusError::not_found(),
        UsersServiceError::InvalidReference
        | UsersServiceError::MissingRequiredData
        | UsersServiceError::InvalidData => StatusError::bad_request().brief("Invalid user payload"),
        UsersServiceError::PasswordHash(source) => {
            error!("failed to hash password: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Sql(source) => {
            error!("user storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
