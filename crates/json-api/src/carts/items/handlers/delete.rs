//! Delete Cart Line Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use bitebuddy_app::domain::carts::data::QuantityAction;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Delete Cart Line Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Line",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart line not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    line: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    state
        .app
        .carts
        .update_quantity(user, line.into_inner().into(), QuantityAction::Remove)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use bitebuddy_app::domain::carts::{
        CartsServiceError, MockCartsService, data::CartLineUpdate, records::CartLineUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, carts_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/items/{line}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_removes_line() -> TestResult {
        let uuid = CartLineUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .withf(move |user, line, action| {
                *user == TEST_USER_UUID && *line == uuid && *action == QuantityAction::Remove
            })
            .return_once(|_, _, _| Ok(CartLineUpdate::Removed));

        carts.expect_add_item().never();
        carts.expect_list_for_user().never();

        let res = TestClient::delete(format!("http://example.com/cart/items/{uuid}"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_line_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        carts.expect_add_item().never();
        carts.expect_list_for_user().never();

        let res = TestClient::delete(format!("http://example.com/cart/items/{}", CartLineUuid::new()))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
