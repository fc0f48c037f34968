//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bitebuddy_app::domain::{
    carts::data::{AddedCartLine, NewCartLine},
    catalog::records::ItemKind,
};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    /// `service` or `menu`
    pub item_kind: String,

    pub item_uuid: Uuid,

    /// Defaults to 1
    pub quantity: Option<u32>,
}

impl AddCartItemRequest {
    fn try_into_new_line(self) -> Result<NewCartLine, StatusError> {
        Ok(NewCartLine {
            item_kind: self
                .item_kind
                .parse::<ItemKind>()
                .or_400("invalid item_kind")?,
            item_uuid: self.item_uuid.into(),
            quantity: self.quantity.unwrap_or(1),
        })
    }
}

/// Cart Item Added Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemAddedResponse {
    /// The cart line, new or merged into
    pub uuid: Uuid,

    pub quantity: u32,

    /// Number of lines now in the cart
    pub cart_lines: u64,
}

impl From<AddedCartLine> for CartItemAddedResponse {
    fn from(added: AddedCartLine) -> Self {
        Self {
            uuid: added.line.uuid.into_uuid(),
            quantity: added.line.quantity,
            cart_lines: added.cart_lines,
        }
    }
}

/// Add Cart Item Handler
///
/// Adding an item already in the cart increases that line's quantity.
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item added"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not found or not orderable"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemAddedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let line = json.into_inner().try_into_new_line()?;

    let added = state
        .app
        .carts
        .add_item(user, line)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/cart/items/{}", added.line.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(added.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bitebuddy_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        catalog::records::CatalogItemUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, carts_service, make_cart_line, make_catalog_item};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/items").post(handler))
    }

    fn carts_mock() -> MockCartsService {
        let mut carts = MockCartsService::new();

        carts.expect_update_quantity().never();
        carts.expect_list_for_user().never();

        carts
    }

    #[tokio::test]
    async fn test_add_item_returns_line_and_count() -> TestResult {
        let item = make_catalog_item(CatalogItemUuid::new(), ItemKind::Menu, 120, 0);
        let item_uuid = item.uuid;
        let line = make_cart_line(&item, 3);
        let line_uuid = line.uuid;

        let mut carts = carts_mock();

        carts
            .expect_add_item()
            .once()
            .withf(move |user, new| {
                *user == TEST_USER_UUID
                    && *new
                        == NewCartLine {
                            item_kind: ItemKind::Menu,
                            item_uuid,
                            quantity: 3,
                        }
            })
            .return_once(move |_, _| {
                Ok(AddedCartLine {
                    line,
                    cart_lines: 2,
                })
            });

        let mut res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "item_kind": "menu", "item_uuid": item_uuid.into_uuid(), "quantity": 3 }))
            .send(&make_service(carts))
            .await;

        let body: CartItemAddedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/cart/items/{line_uuid}").as_str()));
        assert_eq!(body.uuid, line_uuid.into_uuid());
        assert_eq!(body.cart_lines, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_quantity_defaults_to_one() -> TestResult {
        let item = make_catalog_item(CatalogItemUuid::new(), ItemKind::Service, 500, 50);
        let item_uuid = item.uuid;
        let line = make_cart_line(&item, 1);

        let mut carts = carts_mock();

        carts
            .expect_add_item()
            .once()
            .withf(|_, new| new.quantity == 1 && new.item_kind == ItemKind::Service)
            .return_once(move |_, _| {
                Ok(AddedCartLine {
                    line,
                    cart_lines: 1,
                })
            });

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "item_kind": "service", "item_uuid": item_uuid.into_uuid() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_item_kind_returns_400() -> TestResult {
        let mut carts = carts_mock();

        carts.expect_add_item().never();

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "item_kind": "drink", "item_uuid": CatalogItemUuid::new().into_uuid() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_zero_quantity_returns_400() -> TestResult {
        let mut carts = carts_mock();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidQuantity));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({
                "item_kind": "menu",
                "item_uuid": CatalogItemUuid::new().into_uuid(),
                "quantity": 0
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unavailable_item_returns_404() -> TestResult {
        let mut carts = carts_mock();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "item_kind": "menu", "item_uuid": CatalogItemUuid::new().into_uuid() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
