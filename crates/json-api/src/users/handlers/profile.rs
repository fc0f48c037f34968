//! Profile Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use bitebuddy_app::domain::users::records::{UserProfile, UserStats};

use crate::{
    extensions::*, state::State, users::errors::into_status_error, users::handlers::UserResponse,
};

/// Profile Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    pub user: UserResponse,
    pub stats: StatsResponse,
}

/// Account Stats
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatsResponse {
    pub total_orders: u64,

    /// Sum of all order totals, in paise
    pub total_spent: u64,

    /// `total_spent` formatted as rupees
    pub total_spent_display: String,

    pub unread_messages: u64,
    pub cart_lines: u64,
}

impl StatsResponse {
    fn try_from_stats(stats: UserStats) -> Result<Self, StatusError> {
        Ok(Self {
            total_orders: stats.total_orders,
            total_spent: stats.total_spent,
            total_spent_display: stats.total_spent.to_inr_or_500()?,
            unread_messages: stats.unread_messages,
            cart_lines: stats.cart_lines,
        })
    }
}

/// Profile Handler
#[endpoint(
    tags("users"),
    summary = "Get Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile and account stats"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let UserProfile { user, stats } = state
        .app
        .users
        .profile(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProfileResponse {
        user: user.into(),
        stats: StatsResponse::try_from_stats(stats)?,
    }))
}
