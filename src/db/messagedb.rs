use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::messagemodels::{normalize_pair, Conversation, Message};

#[async_trait]
pub trait MessagingExt {
    /// Resolves the conversation for a pair of users, creating it on first
    /// contact. The pair is normalized before lookup so (A,B) and (B,A)
    /// always land on the same row; repeated calls return the existing
    /// conversation.
    async fn find_or_create_conversation(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> Result<Conversation, sqlx::Error>;

    async fn get_conversation_by_id(
        &self,
        conversation_id: Uuid,
    ) -> Result<Option<Conversation>, sqlx::Error>;

    async fn get_user_conversations(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Conversation>, sqlx::Error>;

    async fn send_message(
        &self,
        conversation_id: Uuid,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> Result<Message, sqlx::Error>;

    async fn get_conversation_messages(
        &self,
        conversation_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, sqlx::Error>;

    async fn mark_messages_as_read(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, sqlx::Error>;

    async fn get_unread_count(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<i64, sqlx::Error>;

    async fn get_total_unread_count(&self, user_id: Uuid) -> Result<i64, sqlx::Error>;

    async fn get_last_message(
        &self,
        conversation_id: Uuid,
    ) -> Result<Option<Message>, sqlx::Error>;
}

#[async_trait]
impl MessagingExt for DBClient {
    async fn find_or_create_conversation(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> Result<Conversation, sqlx::Error> {
        let (user_one_id, user_two_id) = normalize_pair(user_a, user_b);

        let existing = sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, user_one_id, user_two_id, last_message_at, created_at, updated_at
            FROM conversations
            WHERE user_one_id = $1 AND user_two_id = $2
            "#,
        )
        .bind(user_one_id)
        .bind(user_two_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(conversation) = existing {
            return Ok(conversation);
        }

        // The no-op DO UPDATE makes the insert return the existing row when
        // two first messages race on the unique pair.
        sqlx::query_as::<_, Conversation>(
            r#"
            INSERT INTO conversations (user_one_id, user_two_id)
            VALUES ($1, $2)
            ON CONFLICT (user_one_id, user_two_id)
                DO UPDATE SET user_one_id = EXCLUDED.user_one_id
            RETURNING id, user_one_id, user_two_id, last_message_at, created_at, updated_at
            "#,
        )
        .bind(user_one_id)
        .bind(user_two_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_conversation_by_id(
        &self,
        conversation_id: Uuid,
    ) -> Result<Option<Conversation>, sqlx::Error> {
        sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, user_one_id, user_two_id, last_message_at, created_at, updated_at
            FROM conversations
            WHERE id = $1
            "#,
        )
        .bind(conversation_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_user_conversations(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Conversation>, sqlx::Error> {
        sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, user_one_id, user_two_id, last_message_at, created_at, updated_at
            FROM conversations
            WHERE user_one_id = $1 OR user_two_id = $1
            ORDER BY last_message_at DESC NULLS LAST, created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn send_message(
        &self,
        conversation_id: Uuid,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> Result<Message, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (conversation_id, sender_id, receiver_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, conversation_id, sender_id, receiver_id, content,
                      is_read, read_at, created_at
            "#,
        )
        .bind(conversation_id)
        .bind(sender_id)
        .bind(receiver_id)
        .bind(content)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE conversations
            SET last_message_at = NOW(), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(conversation_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(message)
    }

    async fn get_conversation_messages(
        &self,
        conversation_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            r#"
            SELECT id, conversation_id, sender_id, receiver_id, content,
                   is_read, read_at, created_at
            FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(conversation_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn mark_messages_as_read(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET is_read = TRUE, read_at = NOW()
            WHERE conversation_id = $1
              AND receiver_id = $2
              AND is_read = FALSE
            "#,
        )
        .bind(conversation_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn get_unread_count(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM messages
            WHERE conversation_id = $1
              AND receiver_id = $2
              AND is_read = FALSE
            "#,
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_total_unread_count(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM messages
            WHERE receiver_id = $1 AND is_read = FALSE
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_last_message(
        &self,
        conversation_id: Uuid,
    ) -> Result<Option<Message>, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            r#"
            SELECT id, conversation_id, sender_id, receiver_id, content,
                   is_read, read_at, created_at
            FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(conversation_id)
        .fetch_optional(&self.pool)
        .await
    }
}
