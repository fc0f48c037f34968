//! Message Errors

use salvo::http::StatusError;
use tracing::error;

use bitebuddy_app::domain::messages::MessagesServiceError;

pub(crate) fn into_status_error(error: MessagesServiceError) -> StatusError {
    match error {
        MessagesServiceError::NotFound => StatusError::not_found(),
        MessagesServiceError::Sql(source) => {
            error!("message storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
