//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use bitebuddy_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::EmptyCart => StatusError::conflict().brief("Cart is empty"),
        OrdersServiceError::StaleItem { .. } => StatusError::conflict().brief(format!(
            "{error}; remove it from the cart and try again"
        )),
        OrdersServiceError::MissingDeliveryAddress => {
            StatusError::bad_request().brief("A delivery address is required")
        }
        OrdersServiceError::InvalidDeliveryLocation => {
            StatusError::bad_request().brief("Delivery coordinates are out of range")
        }
        OrdersServiceError::NotFound => StatusError::not_found(),
        OrdersServiceError::InvalidStatusTransition { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        // Already logged by the orders service, with the user attached.
        OrdersServiceError::InvalidPricing(_) => StatusError::internal_server_error(),
        OrdersServiceError::CheckoutFailed(source) => {
            error!("checkout failed: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid order payload"),
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
