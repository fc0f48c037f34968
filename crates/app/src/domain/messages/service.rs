//! Messages service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        messages::{
            errors::MessagesServiceError, records::MessageRecord,
            repository::PgMessagesRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgMessagesService {
    db: Db,
    repository: PgMessagesRepository,
}

impl PgMessagesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgMessagesRepository::new(),
        }
    }
}

#[async_trait]
impl MessagesService for PgMessagesService {
    async fn list_messages(
        &self,
        user: UserUuid,
    ) -> Result<Vec<MessageRecord>, MessagesServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let messages = self.repository.list_messages(&mut tx, user).await?;

        self.repository.mark_all_read(&mut tx, user).await?;

        tx.commit().await?;

        Ok(messages)
    }

    async fn unread_count(&self, user: UserUuid) -> Result<u64, MessagesServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let count = self.repository.count_unread(&mut tx, user).await?;

        tx.commit().await?;

        Ok(count)
    }
}

#[automock]
#[async_trait]
pub trait MessagesService: Send + Sync {
    /// Newest-first message log. Viewing it marks every message read; the
    /// returned records still show their state from before the call.
    async fn list_messages(
        &self,
        user: UserUuid,
    ) -> Result<Vec<MessageRecord>, MessagesServiceError>;

    /// Number of messages the user has not seen yet.
    async fn unread_count(&self, user: UserUuid) -> Result<u64, MessagesServiceError>;
}
