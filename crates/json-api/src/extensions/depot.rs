//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use bitebuddy_app::domain::users::records::UserUuid;

const USER_UUID_KEY: &str = "user_uuid";
const BEARER_TOKEN_KEY: &str = "bearer_token";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_user_uuid(&mut self, user: UserUuid);

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;

    /// Keep the raw token around for handlers that act on the session itself.
    fn insert_bearer_token(&mut self, token: String);

    fn bearer_token_or_401(&self) -> Result<&str, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user_uuid(&mut self, user: UserUuid) {
        self.insert(USER_UUID_KEY, user);
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.get::<UserUuid>(USER_UUID_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn insert_bearer_token(&mut self, token: String) {
        self.insert(BEARER_TOKEN_KEY, token);
    }

    fn bearer_token_or_401(&self) -> Result<&str, StatusError> {
        self.get::<String>(BEARER_TOKEN_KEY)
            .map(String::as_str)
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
