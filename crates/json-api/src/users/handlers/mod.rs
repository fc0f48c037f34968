//! User Handlers

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod profile;
pub(crate) mod register;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bitebuddy_app::domain::users::{data::IssuedToken, records::UserRecord};

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub location: Option<String>,
    pub profile_pic_url: Option<String>,
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid.into_uuid(),
            name: user.name,
            mobile: user.mobile,
            email: user.email,
            location: user.location,
            profile_pic_url: user.profile_pic_url,
            created_at: user.created_at.to_string(),
        }
    }
}

/// Session Response
///
/// The token is shown once; only its digest is stored.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,

    pub user: UserResponse,
}

impl From<IssuedToken> for SessionResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            user: issued.user.into(),
        }
    }
}
