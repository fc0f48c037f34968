//! Menu Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{errors::into_status_error, handlers::CatalogItemResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuResponse {
    /// Orderable menu items, by serial number
    pub items: Vec<CatalogItemResponse>,
}

/// Menu Handler
#[endpoint(
    tags("catalog"),
    summary = "List Menu",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orderable menu items"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid point in time"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<MenuResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let items = state
        .app
        .catalog
        .list_menu(point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MenuResponse {
        items: CatalogItemResponse::try_from_records(items)?,
    }))
}
