//! Catalog Handlers

pub(crate) mod menu;
pub(crate) mod service;
pub(crate) mod services;

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bitebuddy_app::domain::catalog::records::CatalogItemRecord;

use crate::extensions::*;

/// Catalog Item Response
///
/// Amounts are in paise.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogItemResponse {
    pub uuid: Uuid,

    /// `service` or `menu`
    pub kind: String,

    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub base_price: u64,
    pub discount: u64,

    /// Whole percent, rounded down
    pub discount_percent: u64,

    pub final_price: u64,
    pub final_price_display: String,
    pub serial_number: Option<i32>,
    pub available_from: Option<String>,
    pub available_until: Option<String>,
}

impl CatalogItemResponse {
    /// Catalog rows with inconsistent pricing are a server fault, never a
    /// zero price.
    pub(crate) fn try_from_record(item: CatalogItemRecord) -> Result<Self, StatusError> {
        let final_price = item
            .final_price()
            .or_500("catalog integrity violation")?;
        let discount_percent = item
            .discount_percent()
            .or_500("catalog integrity violation")?;

        Ok(Self {
            uuid: item.uuid.into_uuid(),
            kind: item.kind.to_string(),
            name: item.name,
            category: item.category,
            description: item.description,
            image_url: item.image_url,
            base_price: u64::try_from(item.base_price).or_500("negative base price")?,
            discount: u64::try_from(item.discount).or_500("negative discount")?,
            discount_percent,
            final_price,
            final_price_display: final_price.to_inr_or_500()?,
            serial_number: item.serial_number,
            available_from: item.availability.from.as_ref().map(ToString::to_string),
            available_until: item.availability.until.as_ref().map(ToString::to_string),
        })
    }

    pub(crate) fn try_from_records(
        items: Vec<CatalogItemRecord>,
    ) -> Result<Vec<Self>, StatusError> {
        items.into_iter().map(Self::try_from_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use bitebuddy_app::domain::catalog::records::{CatalogItemUuid, ItemKind};

    use crate::test_helpers::make_catalog_item;

    use super::*;

    #[test]
    fn derives_price_fields_from_base_and_discount() -> TestResult {
        let item = make_catalog_item(CatalogItemUuid::new(), ItemKind::Service, 500, 50);

        let response = CatalogItemResponse::try_from_record(item)?;

        assert_eq!(response.kind, "service");
        assert_eq!(response.final_price, 450);
        assert_eq!(response.discount_percent, 10);
        assert!(
            response.final_price_display.contains("4.50"),
            "got {}",
            response.final_price_display
        );

        Ok(())
    }

    #[test]
    fn discount_above_base_is_a_server_error() {
        let item = make_catalog_item(CatalogItemUuid::new(), ItemKind::Menu, 50, 500);

        assert!(CatalogItemResponse::try_from_record(item).is_err());
    }
}
