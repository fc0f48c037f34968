//! Catalog Errors

use salvo::http::StatusError;
use tracing::error;

use bitebuddy_app::domain::catalog::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::NotFound => StatusError::not_found(),
        CatalogServiceError::AlreadyExists => {
            StatusError::conflict().brief("Catalog item already exists")
        }
        CatalogServiceError::InvalidReference
        | CatalogServiceError::MissingRequiredData
        | CatalogServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid catalog payload")
        }
        CatalogServiceError::InvalidPricing(source) => {
            error!("catalog integrity violation: {source}");

            StatusError::internal_server_error()
        }
        CatalogServiceError::Sql(source) => {
            error!("catalog storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
