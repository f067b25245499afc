//! Seams to the external services an entry goes through.
//!
//! The webhook pipeline only sees these traits, so storage and messaging can
//! be swapped (or faked in tests) without touching it.
use api_types::reply::Message;
use async_trait::async_trait;
use engine::Record;

#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("store failed: {0}")]
    Store(#[from] notion::ApiError),
    #[error("reply failed: {0}")]
    Reply(#[from] line_bot::ApiError),
    #[error("{0}")]
    Other(String),
}

/// Persists records as rows of a database.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Creates one row and returns the stored object as reported by the
    /// store.
    async fn create(
        &self,
        database_id: &str,
        record: &Record,
    ) -> Result<serde_json::Value, CollaboratorError>;
}

/// Sends replies to the user who wrote a message.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn reply(&self, reply_token: &str, messages: Vec<Message>)
    -> Result<(), CollaboratorError>;
}

#[async_trait]
impl RowStore for notion::ApiClient {
    async fn create(
        &self,
        database_id: &str,
        record: &Record,
    ) -> Result<serde_json::Value, CollaboratorError> {
        Ok(self.create_page(database_id, record).await?)
    }
}

#[async_trait]
impl Messenger for line_bot::ApiClient {
    async fn reply(
        &self,
        reply_token: &str,
        messages: Vec<Message>,
    ) -> Result<(), CollaboratorError> {
        Ok(line_bot::ApiClient::reply(self, reply_token, messages).await?)
    }
}
