//! Checkout Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bitebuddy_app::domain::orders::data::Checkout;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Checkout Request
///
/// Every field is optional: the saved profile location is the default
/// address and cash the default payment method.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CheckoutRequest {
    pub payment_method: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_lat: Option<f64>,
    pub delivery_lng: Option<f64>,
}

impl From<CheckoutRequest> for Checkout {
    fn from(request: CheckoutRequest) -> Self {
        Checkout {
            payment_method: request.payment_method,
            delivery_address: request.delivery_address,
            delivery_lat: request.delivery_lat,
            delivery_lng: request.delivery_lng,
        }
    }
}

/// Order Placed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderPlacedResponse {
    pub uuid: Uuid,

    /// Order total in paise
    pub total: u64,

    pub total_display: String,
}

/// Checkout Handler
///
/// Turns the caller's cart into an order. The cart is emptied and a
/// confirmation message posted in the same transaction.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::CONFLICT, description = "Cart is empty or holds an unavailable item"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid delivery location"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderPlacedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let placed = state
        .app
        .orders
        .checkout(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", placed.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderPlacedResponse {
        uuid: placed.uuid.into_uuid(),
        total: placed.total,
        total_display: placed.total.to_inr_or_500()?,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bitebuddy_app::domain::{
        catalog::records::{CatalogItemUuid, ItemKind},
        orders::{
            MockOrdersService, OrdersServiceError,
            records::{OrderUuid, PlacedOrder},
        },
    };

    use crate::test_helpers::{TEST_USER_UUID, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders").post(handler))
    }

    fn orders_mock() -> MockOrdersService {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();
        orders.expect_get_order().never();
        orders.expect_update_status().never();

        orders
    }

    async fn checkout_status(error: OrdersServiceError) -> Option<StatusCode> {
        let mut orders = orders_mock();

        orders.expect_checkout().once().return_once(move |_, _| Err(error));

        TestClient::post("http://example.com/orders")
            .json(&json!({}))
            .send(&make_service(orders))
            .await
            .status_code
    }

    #[tokio::test]
    async fn test_checkout_places_order() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = orders_mock();

        orders
            .expect_checkout()
            .once()
            .withf(|user, request| {
                *user == TEST_USER_UUID
                    && *request
                        == Checkout {
                            payment_method: Some("upi".to_string()),
                            delivery_address: Some("4 Park Street, Kolkata".to_string()),
                            delivery_lat: Some(22.55),
                            delivery_lng: Some(88.35),
                        }
            })
            .return_once(move |_, _| Ok(PlacedOrder { uuid, total: 1_260 }));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "payment_method": "upi",
                "delivery_address": "4 Park Street, Kolkata",
                "delivery_lat": 22.55,
                "delivery_lng": 88.35
            }))
            .send(&make_service(orders))
            .await;

        let body: OrderPlacedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/orders/{uuid}").as_str()));
        assert_eq!(body.total, 1_260);
        assert!(body.total_display.contains("12.60"), "got {}", body.total_display);

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_body_uses_defaults() -> TestResult {
        let mut orders = orders_mock();

        orders
            .expect_checkout()
            .once()
            .withf(|_, request| *request == Checkout::default())
            .return_once(|_, _| {
                Ok(PlacedOrder {
                    uuid: OrderUuid::new(),
                    total: 360,
                })
            });

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({}))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cart_returns_409() {
        assert_eq!(
            checkout_status(OrdersServiceError::EmptyCart).await,
            Some(StatusCode::CONFLICT)
        );
    }

    #[tokio::test]
    async fn test_stale_item_returns_409() {
        let stale = OrdersServiceError::StaleItem {
            item_kind: ItemKind::Service,
            item_uuid: CatalogItemUuid::new(),
        };

        assert_eq!(checkout_status(stale).await, Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn test_missing_address_returns_400() {
        assert_eq!(
            checkout_status(OrdersServiceError::MissingDeliveryAddress).await,
            Some(StatusCode::BAD_REQUEST)
        );
    }

    #[tokio::test]
    async fn test_storage_failure_returns_500() {
        assert_eq!(
            checkout_status(OrdersServiceError::CheckoutFailed(sqlx::Error::PoolTimedOut)).await,
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }
}
