//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, handlers::OrderResponse},
    state::State,
};

/// Get Order Handler
///
/// Orders belonging to other users are reported as not found.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order with its items"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = state
        .app
        .orders
        .get_order(user, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderResponse::try_from_order(order)?))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bitebuddy_app::domain::{
        catalog::records::{CatalogItemUuid, ItemKind},
        orders::{
            MockOrdersService, OrdersServiceError,
            records::{OrderItemRecord, OrderItemUuid, OrderStatus, OrderUuid, OrderWithItems},
        },
    };

    use crate::test_helpers::{TEST_USER_UUID, make_order, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders/{order}").get(handler))
    }

    fn orders_mock() -> MockOrdersService {
        let mut orders = MockOrdersService::new();

        orders.expect_checkout().never();
        orders.expect_list_orders().never();
        orders.expect_update_status().never();

        orders
    }

    #[tokio::test]
    async fn test_order_includes_snapshotted_items() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = orders_mock();

        orders
            .expect_get_order()
            .once()
            .withf(move |user, order| *user == TEST_USER_UUID && *order == uuid)
            .return_once(move |_, _| {
                Ok(OrderWithItems {
                    order: make_order(uuid, OrderStatus::Pending, 900),
                    items: vec![OrderItemRecord {
                        uuid: OrderItemUuid::new(),
                        order_uuid: uuid,
                        item_kind: ItemKind::Service,
                        item_uuid: CatalogItemUuid::new(),
                        name: "South Indian Thali".to_string(),
                        quantity: 2,
                        price_at_time: 450,
                    }],
                })
            });

        let response: OrderResponse = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await
            .take_json()
            .await?;

        let item = response.items.first().ok_or("expected one order item")?;

        assert_eq!(response.status, "pending");
        assert_eq!(response.total_amount, 900);
        assert_eq!(item.price_at_time, 450);
        assert_eq!(item.line_total, 900);

        Ok(())
    }

    #[tokio::test]
    async fn test_other_users_order_returns_404() -> TestResult {
        let mut orders = orders_mock();

        orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{}", OrderUuid::new()))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
