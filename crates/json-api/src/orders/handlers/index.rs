//! Order Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bitebuddy_app::domain::orders::data::OrderFilter;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, handlers::OrderResponse},
    state::State,
};

/// Order History Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderHistoryResponse {
    /// Pending, preparing or out for delivery, newest first
    pub active: Vec<OrderResponse>,

    /// Delivered or cancelled, newest first
    pub historical: Vec<OrderResponse>,
}

/// Order Index Handler
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The caller's orders"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status filter"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrderHistoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let filter = status
        .into_inner()
        .map(|value| value.parse::<OrderFilter>())
        .transpose()
        .or_400("could not parse \"status\" query parameter")?
        .unwrap_or_default();

    let history = state
        .app
        .orders
        .list_orders(user, filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderHistoryResponse {
        active: OrderResponse::try_from_orders(history.active)?,
        historical: OrderResponse::try_from_orders(history.historical)?,
    }))
}
