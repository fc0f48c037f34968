//! Users, credentials and API tokens.

pub mod data;
pub mod errors;
mod passwords;
pub mod records;
pub(crate) mod repository;
pub mod service;
pub mod tokens;
pub mod validation;

pub use errors::UsersServiceError;
pub use service::*;

/// First message every new account receives.
pub const WELCOME_MESSAGE: &str = "Welcome to BiteBuddy! 🎉 Start ordering delicious food.";
