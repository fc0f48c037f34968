//! Register Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bitebuddy_app::domain::users::data::NewUser;

use crate::{
    extensions::*, state::State, users::errors::into_status_error,
    users::handlers::SessionResponse,
};

/// Register Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub name: String,

    /// Ten digit mobile number, used to log in
    pub mobile: String,

    pub email: String,
    pub password: String,
    pub password_confirmation: String,

    /// Default delivery address
    pub location: Option<String>,

    pub profile_pic_url: Option<String>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("mobile", &self.mobile)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        NewUser {
            name: request.name,
            mobile: request.mobile,
            email: request.email,
            password: request.password,
            password_confirmation: request.password_confirmation,
            location: request.location,
            profile_pic_url: request.profile_pic_url,
        }
    }
}

/// Register Handler
///
/// Creates an account and returns its first API token.
#[endpoint(
    tags("users"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Mobile number or email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let issued = state
        .app
        .users
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, "/profile", true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(issued.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use bitebuddy_app::domain::users::{
        MockUsersService, UsersServiceError, data::IssuedToken, records::UserUuid,
        validation::RegistrationError,
    };

    use crate::test_helpers::{make_user, public_users_service};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        public_users_service(users, Router::with_path("users").post(handler))
    }

    fn users_mock() -> MockUsersService {
        let mut users = MockUsersService::new();

        users.expect_login().never();
        users.expect_issue_token().never();
        users.expect_authenticate_bearer().never();
        users.expect_logout().never();
        users.expect_profile().never();

        users
    }

    fn registration() -> Value {
        json!({
            "name": "Asha",
            "mobile": "9876543210",
            "email": "asha@example.com",
            "password": "secret-pass",
            "password_confirmation": "secret-pass",
            "location": "12 MG Road, Bengaluru"
        })
    }

    #[tokio::test]
    async fn test_register_returns_token_and_user() -> TestResult {
        let user = make_user(UserUuid::new());
        let uuid = user.uuid;

        let mut users = users_mock();

        users
            .expect_register()
            .once()
            .withf(|new| {
                new.mobile == "9876543210"
                    && new.password == "secret-pass"
                    && new.location.as_deref() == Some("12 MG Road, Bengaluru")
                    && new.profile_pic_url.is_none()
            })
            .return_once(move |_| {
                Ok(IssuedToken {
                    user,
                    token: "bb_first".to_string(),
                })
            });

        let mut res = TestClient::post("http://example.com/users")
            .json(&registration())
            .send(&make_service(users))
            .await;

        let body: SessionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.token, "bb_first");
        assert_eq!(body.user.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_returns_409() -> TestResult {
        let mut users = users_mock();

        users
            .expect_register()
            .once()
            .return_once(|_| Err(UsersServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/users")
            .json(&registration())
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_mismatched_passwords_returns_400() -> TestResult {
        let mut users = users_mock();

        users
            .expect_register()
            .once()
            .return_once(|_| Err(RegistrationError::PasswordMismatch.into()));

        let res = TestClient::post("http://example.com/users")
            .json(&registration())
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_missing_fields_returns_400() -> TestResult {
        let mut users = users_mock();

        users.expect_register().never();

        let res = TestClient::post("http://example.com/users")
            .json(&json!({ "name": "Asha" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
