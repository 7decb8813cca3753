use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use super::repository::{CreateMessage, MessageRepository};
use super::types::Message;
use crate::RosterError;

fn poisoned<T>(_: T) -> RosterError {
    RosterError::DatabaseError("Lock poisoned".to_owned())
}

/// In-memory message store. Cloning shares the store.
#[derive(Clone)]
pub struct InMemoryMessageRepository {
    messages: Arc<RwLock<HashMap<i32, Message>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }

    fn collect<F>(&self, filter: F) -> Result<Vec<Message>, RosterError>
    where
        F: Fn(&Message) -> bool,
    {
        let messages = self.messages.read().map_err(poisoned)?;
        let mut found: Vec<Message> = messages.values().filter(|m| filter(m)).cloned().collect();
        found.sort_by(|a, b| b.sent_at.cmp(&a.sent_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }
}

impl Default for InMemoryMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(&self, message: CreateMessage) -> Result<Message, RosterError> {
        let message = Message {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            sender_id: message.sender_id,
            recipient_id: message.recipient_id,
            title: message.title,
            text: message.text,
            attachments: message.attachments,
            sent_at: Utc::now(),
            seen_at: None,
        };

        self.messages
            .write()
            .map_err(poisoned)?
            .insert(message.id, message.clone());

        Ok(message)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Message>, RosterError> {
        let messages = self.messages.read().map_err(poisoned)?;
        Ok(messages.get(&id).cloned())
    }

    async fn find_by_recipient(&self, user_id: i32) -> Result<Vec<Message>, RosterError> {
        self.collect(|m| m.recipient_id == user_id)
    }

    async fn find_by_sender(&self, user_id: i32) -> Result<Vec<Message>, RosterError> {
        self.collect(|m| m.sender_id == user_id)
    }

    async fn mark_seen(&self, id: i32) -> Result<Message, RosterError> {
        let mut messages = self.messages.write().map_err(poisoned)?;
        let message = messages.get_mut(&id).ok_or(RosterError::NotFound)?;

        if message.seen_at.is_none() {
            message.seen_at = Some(Utc::now());
        }

        Ok(message.clone())
    }
}
