//! Service Index Handler

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
pub(crate) struct ServicesResponse {
    /// Orderable services, newest first
    pub services: Vec<CatalogItemResponse>,
}

/// Service Index Handler
///
/// Lists services orderable at `at`, or now.
#[endpoint(
    tags("catalog"),
    summary = "List Services",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orderable services"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid point in time"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ServicesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let services = state
        .app
        .catalog
        .list_services(point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ServicesResponse {
        services: CatalogItemResponse::try_from_records(services)?,
    }))
}
