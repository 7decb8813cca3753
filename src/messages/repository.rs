use async_trait::async_trait;

use super::types::{Attachment, Message};
use crate::RosterError;

#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub sender_id: i32,
    pub recipient_id: i32,
    pub title: String,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: CreateMessage) -> Result<Message, RosterError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Message>, RosterError>;
    /// Inbox of `user_id`, newest first.
    async fn find_by_recipient(&self, user_id: i32) -> Result<Vec<Message>, RosterError>;
    /// Messages sent by `user_id`, newest first.
    async fn find_by_sender(&self, user_id: i32) -> Result<Vec<Message>, RosterError>;
    /// Sets `seen_at` if it is not set yet and returns the stored message.
    async fn mark_seen(&self, id: i32) -> Result<Message, RosterError>;
}
