//! Users Data

use crate::domain::users::records::UserRecord;

/// New User Data
#[derive(Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub location: Option<String>,
    pub profile_pic_url: Option<String>,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("mobile", &self.mobile)
            .field("email", &self.email)
            .field("location", &self.location)
            .field("profile_pic_url", &self.profile_pic_url)
            .finish_non_exhaustive()
    }
}

/// Login Credentials
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub mobile: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("mobile", &self.mobile)
            .finish_non_exhaustive()
    }
}

/// A freshly issued bearer token. The raw value is never stored.
#[derive(Clone, PartialEq)]
pub struct IssuedToken {
    pub user: UserRecord,
    pub token: String,
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}
