//! Get Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bitebuddy_app::domain::carts::records::{Cart, CartEntry};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Most recently added first
    pub lines: Vec<CartLineResponse>,

    /// Sum over available lines, in paise
    pub total: u64,

    pub total_display: String,
}

impl CartResponse {
    fn try_from_cart(cart: Cart) -> Result<Self, StatusError> {
        Ok(Self {
            lines: cart.entries.into_iter().map(CartLineResponse::from).collect(),
            total: cart.total,
            total_display: cart.total.to_inr_or_500()?,
        })
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub uuid: Uuid,
    pub item_kind: String,
    pub item_uuid: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub quantity: u32,

    /// Current price, not a snapshot
    pub unit_price: u64,

    pub line_total: u64,

    /// False once the item is deleted or outside its availability window.
    /// Such lines are left out of the total and block checkout.
    pub available: bool,
}

impl From<CartEntry> for CartLineResponse {
    fn from(entry: CartEntry) -> Self {
        Self {
            uuid: entry.line.uuid.into_uuid(),
            item_kind: entry.line.item_kind.to_string(),
            item_uuid: entry.line.item_uuid.into_uuid(),
            name: entry.item.name,
            image_url: entry.item.image_url,
            quantity: entry.line.quantity,
            unit_price: entry.unit_price,
            line_total: entry.line_total,
            available: entry.available,
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's cart priced as of `at`, or now.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart contents and total"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid point in time"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let point_in_time = at.into_point_in_time()?;

    let cart = state
        .app
        .carts
        .list_for_user(user, point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::try_from_cart(cart)?))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bitebuddy_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        catalog::{
            pricing::PricingError,
            records::{CatalogItemUuid, ItemKind},
        },
    };

    use crate::test_helpers::{TEST_USER_UUID, carts_service, make_cart_line, make_catalog_item};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart").get(handler))
    }

    fn carts_mock() -> MockCartsService {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();
        carts.expect_update_quantity().never();

        carts
    }

    #[tokio::test]
    async fn test_cart_lists_lines_and_total() -> TestResult {
        let service = make_catalog_item(CatalogItemUuid::new(), ItemKind::Service, 500, 50);
        let menu = make_catalog_item(CatalogItemUuid::new(), ItemKind::Menu, 120, 0);

        let mut deleted = make_catalog_item(CatalogItemUuid::new(), ItemKind::Menu, 300, 0);
        deleted.deleted_at = Some(jiff::Timestamp::UNIX_EPOCH);

        let entries = vec![
            CartEntry {
                line: make_cart_line(&service, 2),
                item: service,
                unit_price: 450,
                line_total: 900,
                available: true,
            },
            CartEntry {
                line: make_cart_line(&menu, 3),
                item: menu,
                unit_price: 120,
                line_total: 360,
                available: true,
            },
            CartEntry {
                line: make_cart_line(&deleted, 1),
                item: deleted,
                unit_price: 300,
                line_total: 300,
                available: false,
            },
        ];

        let mut carts = carts_mock();

        carts
            .expect_list_for_user()
            .once()
            .withf(|user, _| *user == TEST_USER_UUID)
            .return_once(move |_, _| {
                Ok(Cart {
                    entries,
                    total: 1_260,
                })
            });

        let response: CartResponse = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        let available: Vec<bool> = response.lines.iter().map(|line| line.available).collect();

        assert_eq!(response.total, 1_260);
        assert!(response.total_display.contains("12.60"), "got {}", response.total_display);
        assert_eq!(available, vec![true, true, false]);

        Ok(())
    }

    #[tokio::test]
    async fn test_cart_with_corrupt_pricing_returns_500() -> TestResult {
        let mut carts = carts_mock();

        carts.expect_list_for_user().once().return_once(|_, _| {
            Err(CartsServiceError::InvalidPricing(PricingError::DiscountExceedsBase {
                base_price: 100,
                discount: 150,
            }))
        });

        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
