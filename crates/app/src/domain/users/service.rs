//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        messages::repository::PgMessagesRepository,
        users::{
            WELCOME_MESSAGE,
            data::{Credentials, IssuedToken, NewUser},
            errors::UsersServiceError,
            passwords::{hash_password, verify_password},
            records::{UserProfile, UserUuid},
            repository::{PgUsersRepository, UserInsert},
            tokens::{generate_token, hash_token},
            validation::validate_new_user,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
    messages: PgMessagesRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            messages: PgMessagesRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn register(&self, user: NewUser) -> Result<IssuedToken, UsersServiceError> {
        let user = normalise(user);

        validate_new_user(&user)?;

        let password_hash = hash_password(&user.password)?;
        let uuid = UserUuid::new();

        // Context is set up front so the welcome message passes the RLS check.
        let mut tx = self.db.begin_user_transaction(uuid).await?;

        let created = self
            .repository
            .create_user(
                &mut tx,
                UserInsert {
                    uuid,
                    name: &user.name,
                    mobile: &user.mobile,
                    email: &user.email,
                    password_hash: &password_hash,
                    location: user.location.as_deref(),
                    profile_pic_url: user.profile_pic_url.as_deref(),
                },
            )
            .await?;

        self.messages
            .create_message(&mut tx, uuid, WELCOME_MESSAGE, None)
            .await?;

        let token = generate_token();

        self.repository
            .create_api_token(&mut tx, uuid, &hash_token(&token))
            .await?;

        tx.commit().await?;

        info!(user_uuid = %uuid, "user registered");

        Ok(IssuedToken {
            user: created,
            token,
        })
    }

    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(stored) = self
            .repository
            .find_credentials_by_mobile(&mut tx, credentials.mobile.trim())
            .await?
        else {
            return Err(UsersServiceError::InvalidCredentials);
        };

        if !verify_password(&credentials.password, &stored.password_hash)? {
            warn!(user_uuid = %stored.uuid, "login rejected: wrong password");

            return Err(UsersServiceError::InvalidCredentials);
        }

        let user = self.repository.get_user(&mut tx, stored.uuid).await?;
        let token = generate_token();

        self.repository
            .create_api_token(&mut tx, user.uuid, &hash_token(&token))
            .await?;

        tx.commit().await?;

        Ok(IssuedToken { user, token })
    }

    async fn issue_token(&self, user: UserUuid) -> Result<IssuedToken, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;
        let token = generate_token();

        self.repository
            .create_api_token(&mut tx, user.uuid, &hash_token(&token))
            .await?;

        tx.commit().await?;

        Ok(IssuedToken { user, token })
    }

    async fn authenticate_bearer(&self, token: &str) -> Result<UserUuid, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .authenticate_api_token(&mut tx, &hash_token(token))
            .await?
            .ok_or(UsersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(user)
    }

    async fn logout(&self, token: &str) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .revoke_api_token(&mut tx, &hash_token(token))
            .await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn profile(&self, user: UserUuid) -> Result<UserProfile, UsersServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let record = self.repository.get_user(&mut tx, user).await?;
        let stats = self.repository.get_user_stats(&mut tx, user).await?;

        tx.commit().await?;

        Ok(UserProfile {
            user: record,
            stats,
        })
    }
}

fn normalise(user: NewUser) -> NewUser {
    NewUser {
        name: user.name.trim().to_string(),
        mobile: user.mobile.trim().to_string(),
        email: user.email.trim().to_string(),
        location: non_blank(user.location),
        profile_pic_url: non_blank(user.profile_pic_url),
        ..user
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Create an account, post the welcome message and issue a first token.
    async fn register(&self, user: NewUser) -> Result<IssuedToken, UsersServiceError>;

    /// Exchange a mobile number and password for a new token.
    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, UsersServiceError>;

    /// Issue an extra token for an existing user.
    async fn issue_token(&self, user: UserUuid) -> Result<IssuedToken, UsersServiceError>;

    /// Resolve a raw bearer token to the user it belongs to.
    async fn authenticate_bearer(&self, token: &str) -> Result<UserUuid, UsersServiceError>;

    /// Revoke a raw bearer token.
    async fn logout(&self, token: &str) -> Result<(), UsersServiceError>;

    /// The user's details with order, message and cart counts.
    async fn profile(&self, user: UserUuid) -> Result<UserProfile, UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            messages::MessagesService,
            orders::{OrdersService, data::Checkout},
            users::validation::RegistrationError,
        },
        test::{
            TestContext,
            helpers::{add_to_cart, create_menu_item, new_user},
        },
    };

    use super::*;

    #[tokio::test]
    async fn register_returns_user_and_working_token() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx
            .users
            .register(NewUser {
                name: "  Ravi Kumar ".to_string(),
                location: Some("   ".to_string()),
                ..new_user("9988776655", "ravi@example.com")
            })
            .await?;

        assert_eq!(issued.user.name, "Ravi Kumar");
        assert_eq!(issued.user.mobile, "9988776655");
        assert!(issued.user.location.is_none());
        assert_eq!(
            ctx.users.authenticate_bearer(&issued.token).await?,
            issued.user.uuid
        );

        Ok(())
    }

    #[tokio::test]
    async fn register_sends_welcome_message() -> TestResult {
        let ctx = TestContext::new().await;

        let messages = ctx.messages.list_messages(ctx.user_uuid).await?;

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, WELCOME_MESSAGE);
        assert!(!messages[0].is_read);

        Ok(())
    }

    #[tokio::test]
    async fn register_duplicate_mobile_returns_already_exists() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .register(new_user("9876543210", "someone-else@example.com"))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );
    }

    #[tokio::test]
    async fn register_validates_input() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .register(NewUser {
                password_confirmation: "different".to_string(),
                ..new_user("9111111111", "mismatch@example.com")
            })
            .await;

        assert!(matches!(
            result,
            Err(UsersServiceError::InvalidRegistration(
                RegistrationError::PasswordMismatch
            ))
        ));
    }

    #[tokio::test]
    async fn login_with_correct_password_issues_token() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx
            .users
            .login(Credentials {
                mobile: " 9876543210 ".to_string(),
                password: "secret-pass".to_string(),
            })
            .await?;

        assert_eq!(issued.user.uuid, ctx.user_uuid);
        assert_eq!(
            ctx.users.authenticate_bearer(&issued.token).await?,
            ctx.user_uuid
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let ctx = TestContext::new().await;

        let wrong_password = ctx
            .users
            .login(Credentials {
                mobile: "9876543210".to_string(),
                password: "not-it".to_string(),
            })
            .await;

        let unknown_mobile = ctx
            .users
            .login(Credentials {
                mobile: "9000000000".to_string(),
                password: "secret-pass".to_string(),
            })
            .await;

        assert!(matches!(
            wrong_password,
            Err(UsersServiceError::InvalidCredentials)
        ));
        assert!(matches!(
            unknown_mobile,
            Err(UsersServiceError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn logout_revokes_token() -> TestResult {
        let ctx = TestContext::new().await;
        let issued = ctx.users.issue_token(ctx.user_uuid).await?;

        ctx.users.logout(&issued.token).await?;

        let result = ctx.users.authenticate_bearer(&issued.token).await;

        assert!(matches!(result, Err(UsersServiceError::NotFound)));

        let again = ctx.users.logout(&issued.token).await;

        assert!(matches!(again, Err(UsersServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.authenticate_bearer("bb_not-a-real-token").await;

        assert!(matches!(result, Err(UsersServiceError::NotFound)));
    }

    #[tokio::test]
    async fn profile_reports_activity() -> TestResult {
        let ctx = TestContext::new().await;
        let thali = create_menu_item(&ctx, "Mini Thali", 200, 20).await;
        let lassi = create_menu_item(&ctx, "Lassi", 60, 0).await;

        add_to_cart(&ctx, ctx.user_uuid, &thali, 2).await;
        ctx.orders.checkout(ctx.user_uuid, Checkout::default()).await?;
        add_to_cart(&ctx, ctx.user_uuid, &lassi, 1).await;

        let profile = ctx.users.profile(ctx.user_uuid).await?;

        assert_eq!(profile.user.uuid, ctx.user_uuid);
        assert_eq!(profile.stats.total_orders, 1);
        assert_eq!(profile.stats.total_spent, 360);
        assert_eq!(profile.stats.unread_messages, 2);
        assert_eq!(profile.stats.cart_lines, 1);

        Ok(())
    }
}
