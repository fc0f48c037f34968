//! Message Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bitebuddy_app::domain::messages::records::MessageRecord;

use crate::{extensions::*, messages::errors::into_status_error, state::State};

/// Message Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    pub uuid: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub sent_at: String,

    /// Read state before this listing
    pub is_read: bool,
}

impl From<MessageRecord> for MessageResponse {
    fn from(message: MessageRecord) -> Self {
        Self {
            uuid: message.uuid.into_uuid(),
            content: message.content,
            image_url: message.image_url,
            sent_at: message.sent_at.to_string(),
            is_read: message.is_read,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessagesResponse {
    /// Newest first
    pub messages: Vec<MessageResponse>,
}

/// Message Index Handler
///
/// Lists the caller's messages and marks them all read.
#[endpoint(
    tags("messages"),
    summary = "List Messages",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Message log"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MessagesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let messages = state
        .app
        .messages
        .list_messages(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessagesResponse {
        messages: messages.into_iter().map(Into::into).collect(),
    }))
}
