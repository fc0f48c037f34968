//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bitebuddy_app::domain::users::data::Credentials;

use crate::{
    extensions::*, state::State, users::errors::into_status_error,
    users::handlers::SessionResponse,
};

/// Login Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub mobile: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("mobile", &self.mobile)
            .finish_non_exhaustive()
    }
}

/// Login Handler
///
/// Issues a new API token for a mobile number and password.
#[endpoint(
    tags("users"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Token issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid mobile number or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let LoginRequest { mobile, password } = json.into_inner();

    let issued = state
        .app
        .users
        .login(Credentials { mobile, password })
        .await
        .map_err(into_status_error)?;

    Ok(Json(issued.into()))
}
