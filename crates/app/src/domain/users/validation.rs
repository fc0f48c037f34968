//! Registration input checks.

use thiserror::Error;

use crate::domain::users::data::NewUser;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("name is required")]
    BlankName,

    #[error("mobile number must be exactly 10 digits")]
    InvalidMobile,

    #[error("email address is invalid")]
    InvalidEmail,

    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Check a registration form before anything touches the database.
///
/// # Errors
///
/// Returns the first rule the input breaks.
pub fn validate_new_user(user: &NewUser) -> Result<(), RegistrationError> {
    if user.name.trim().is_empty() {
        return Err(RegistrationError::BlankName);
    }

    if !is_valid_mobile(&user.mobile) {
        return Err(RegistrationError::InvalidMobile);
    }

    if !is_valid_email(&user.email) {
        return Err(RegistrationError::InvalidEmail);
    }

    if user.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(RegistrationError::PasswordTooShort);
    }

    if user.password != user.password_confirmation {
        return Err(RegistrationError::PasswordMismatch);
    }

    Ok(())
}

fn is_valid_mobile(mobile: &str) -> bool {
    mobile.len() == 10 && mobile.bytes().all(|byte| byte.is_ascii_digit())
}

fn is_valid_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
}
