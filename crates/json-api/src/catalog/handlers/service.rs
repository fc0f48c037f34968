//! Get Service Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bitebuddy_app::domain::catalog::records::{ServiceDetails, ServiceItemRecord};

use crate::{
    catalog::{errors::into_status_error, handlers::CatalogItemResponse},
    extensions::*,
    state::State,
};

/// Service Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ServiceItemResponse {
    pub uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: u64,
    pub price_display: String,
    pub serial_number: i32,
}

impl ServiceItemResponse {
    fn try_from_record(item: ServiceItemRecord) -> Result<Self, StatusError> {
        Ok(Self {
            uuid: item.uuid.into_uuid(),
            name: item.name,
            description: item.description,
            image_url: item.image_url,
            price: item.price,
            price_display: item.price.to_inr_or_500()?,
            serial_number: item.serial_number,
        })
    }
}

/// Service Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ServiceResponse {
    pub service: CatalogItemResponse,

    /// Listed items, by serial number
    pub items: Vec<ServiceItemResponse>,
}

/// Get Service Handler
#[endpoint(
    tags("catalog"),
    summary = "Get Service",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Service with its items"),
        (status_code = StatusCode::NOT_FOUND, description = "Service not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    service: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ServiceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let ServiceDetails { service, items } = state
        .app
        .catalog
        .get_service(service.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ServiceResponse {
        service: CatalogItemResponse::try_from_record(service)?,
        items: items
            .into_iter()
            .map(ServiceItemResponse::try_from_record)
            .collect::<Result<_, _>>()?,
    }))
}
