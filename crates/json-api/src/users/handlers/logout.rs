//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// Logout Handler
///
/// Revokes the token the request was authenticated with.
#[endpoint(
    tags("users"),
    summary = "Log Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Token revoked"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let token = depot.bearer_token_or_401()?;

    state
        .app
        .users
        .logout(token)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use bitebuddy_app::domain::users::{MockUsersService, UsersServiceError};

    use crate::test_helpers::{TEST_TOKEN, users_service};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        users_service(users, Router::with_path("sessions").delete(handler))
    }

    fn users_mock() -> MockUsersService {
        let mut users = MockUsersService::new();

        users.expect_register().never();
        users.expect_login().never();
        users.expect_issue_token().never();
        users.expect_authenticate_bearer().never();
        users.expect_profile().never();

        users
    }

    #[tokio::test]
    async fn test_logout_revokes_current_token() -> TestResult {
        let mut users = users_mock();

        users
            .expect_logout()
            .once()
            .withf(|token| token == TEST_TOKEN)
            .return_once(|_| Ok(()));

        let res = TestClient::delete("http://example.com/sessions")
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_logout_of_revoked_token_returns_404() -> TestResult {
        let mut users = users_mock();

        users
            .expect_logout()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let res = TestClient::delete("http://example.com/sessions")
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
