//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::try_get_amount,
    domain::users::records::{
        ApiTokenUuid, CredentialsRecord, UserRecord, UserStats, UserUuid,
    },
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const LOCK_USER_SQL: &str = include_str!("sql/lock_user.sql");
const FIND_CREDENTIALS_BY_MOBILE_SQL: &str = include_str!("sql/find_credentials_by_mobile.sql");
const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const AUTHENTICATE_API_TOKEN_SQL: &str = include_str!("sql/authenticate_api_token.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("sql/revoke_api_token.sql");
const GET_USER_STATS_SQL: &str = include_str!("sql/get_user_stats.sql");

/// Columns written when creating a user.
#[derive(Debug)]
pub(crate) struct UserInsert<'a> {
    pub uuid: UserUuid,
    pub name: &'a str,
    pub mobile: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub location: Option<&'a str>,
    pub profile_pic_url: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserInsert<'_>,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.name)
            .bind(user.mobile)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.location)
            .bind(user.profile_pic_url)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Lock the user's row until the transaction ends.
    pub(crate) async fn lock_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LOCK_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_credentials_by_mobile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mobile: &str,
    ) -> Result<Option<CredentialsRecord>, sqlx::Error> {
        let row: Option<(Uuid, String)> = query_as(FIND_CREDENTIALS_BY_MOBILE_SQL)
            .bind(mobile)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(|(uuid, password_hash)| CredentialsRecord {
            uuid: UserUuid::from_uuid(uuid),
            password_hash,
        }))
    }

    pub(crate) async fn create_api_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        token_hash: &str,
    ) -> Result<ApiTokenUuid, sqlx::Error> {
        let token = ApiTokenUuid::new();

        query(CREATE_API_TOKEN_SQL)
            .bind(token.into_uuid())
            .bind(user.into_uuid())
            .bind(token_hash)
            .execute(&mut **tx)
            .await?;

        Ok(token)
    }

    /// Resolve an active token to its user, stamping `last_used_at`.
    pub(crate) async fn authenticate_api_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_hash: &str,
    ) -> Result<Option<UserUuid>, sqlx::Error> {
        let user: Option<(Uuid,)> = query_as(AUTHENTICATE_API_TOKEN_SQL)
            .bind(token_hash)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(user.map(|(uuid,)| UserUuid::from_uuid(uuid)))
    }

    pub(crate) async fn revoke_api_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REVOKE_API_TOKEN_SQL)
            .bind(token_hash)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_user_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserStats, sqlx::Error> {
        let row = query(GET_USER_STATS_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(UserStats {
            total_orders: try_get_amount(&row, "total_orders")?,
            total_spent: try_get_amount(&row, "total_spent")?,
            unread_messages: try_get_amount(&row, "unread_messages")?,
            cart_lines: try_get_amount(&row, "cart_lines")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            mobile: row.try_get("mobile")?,
            email: row.try_get("email")?,
            location: row.try_get("location")?,
            profile_pic_url: row.try_get("profile_pic_url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
