//! Messages Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    messages::records::{MessageRecord, MessageUuid},
    users::records::UserUuid,
};

const CREATE_MESSAGE_SQL: &str = include_str!("sql/create_message.sql");
const LIST_MESSAGES_SQL: &str = include_str!("sql/list_messages.sql");
const MARK_ALL_READ_SQL: &str = include_str!("sql/mark_all_read.sql");
const COUNT_UNREAD_SQL: &str = include_str!("sql/count_unread.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgMessagesRepository;

impl PgMessagesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Append a message to the user's log.
    pub(crate) async fn create_message(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        content: &str,
        image_url: Option<&str>,
    ) -> Result<MessageRecord, sqlx::Error> {
        query_as::<Postgres, MessageRecord>(CREATE_MESSAGE_SQL)
            .bind(MessageUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(content)
            .bind(image_url)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_messages(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<MessageRecord>, sqlx::Error> {
        query_as::<Postgres, MessageRecord>(LIST_MESSAGES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn mark_all_read(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_ALL_READ_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_unread(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_UNREAD_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|error| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(error),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for MessageRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: MessageUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            content: row.try_get("content")?,
            image_url: row.try_get("image_url")?,
            sent_at: row.try_get::<SqlxTimestamp, _>("sent_at")?.to_jiff(),
            is_read: row.try_get("is_read")?,
        })
    }
}
