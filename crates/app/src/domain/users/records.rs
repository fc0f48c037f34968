//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub location: Option<String>,
    pub profile_pic_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Stored login credentials for a user.
#[derive(Debug, Clone)]
pub(crate) struct CredentialsRecord {
    pub uuid: UserUuid,
    pub password_hash: String,
}

/// API Token UUID
pub type ApiTokenUuid = TypedUuid<ApiTokenRecord>;

/// API Token Record
#[derive(Debug, Clone)]
pub struct ApiTokenRecord;

/// Aggregates shown on the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserStats {
    pub total_orders: u64,
    pub total_spent: u64,
    pub unread_messages: u64,
    pub cart_lines: u64,
}

/// User Profile
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user: UserRecord,
    pub stats: UserStats,
}
