//! Update Cart Line Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bitebuddy_app::domain::carts::data::{CartLineUpdate, QuantityAction};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Update Cart Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartLineRequest {
    /// `increase`, `decrease` or `remove`. Decreasing stops at 1.
    pub action: String,
}

/// Cart Line Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineUpdatedResponse {
    pub uuid: Uuid,

    /// Absent when the line was removed
    pub quantity: Option<u32>,

    pub removed: bool,
}

/// Update Cart Line Handler
#[endpoint(
    tags("cart"),
    summary = "Change Cart Line Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Line updated or removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart line not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    line: PathParam<Uuid>,
    json: JsonBody<UpdateCartLineRequest>,
    depot: &mut Depot,
) -> Result<Json<CartLineUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let line = line.into_inner();

    let action = json
        .into_inner()
        .action
        .parse::<QuantityAction>()
        .or_400("invalid action")?;

    let update = state
        .app
        .carts
        .update_quantity(user, line.into(), action)
        .await
        .map_err(into_status_error)?;

    let response = match update {
        CartLineUpdate::Updated(record) => CartLineUpdatedResponse {
            uuid: record.uuid.into_uuid(),
            quantity: Some(record.quantity),
            removed: false,
        },
        CartLineUpdate::Removed => CartLineUpdatedResponse {
            uuid: line,
            quantity: None,
            removed: true,
        },
    };

    Ok(Json(response))
}
