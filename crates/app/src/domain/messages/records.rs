//! Message Records

use jiff::Timestamp;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Message UUID
pub type MessageUuid = TypedUuid<MessageRecord>;

/// Message Record
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRecord {
    pub uuid: MessageUuid,
    pub user_uuid: UserUuid,
    pub content: String,
    pub image_url: Option<String>,
    pub sent_at: Timestamp,
    pub is_read: bool,
}
