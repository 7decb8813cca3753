use chrono::Utc;

use crate::config::MessageConfig;
use crate::events::{dispatch, RosterEvent};
use crate::messages::{Attachment, CreateMessage, Message, MessageRepository};
use crate::validators::{validate_attachments, validate_message_text, validate_message_title};
use crate::{RosterError, UserDirectory};

/// Action to send a message to a user addressed by handle.
pub struct SendMessageAction<U: UserDirectory, M: MessageRepository> {
    users: U,
    message_repo: M,
    config: MessageConfig,
}

impl<U: UserDirectory, M: MessageRepository> SendMessageAction<U, M> {
    pub fn new(users: U, message_repo: M) -> Self {
        Self::with_config(users, message_repo, MessageConfig::default())
    }

    pub fn with_config(users: U, message_repo: M, config: MessageConfig) -> Self {
        Self {
            users,
            message_repo,
            config,
        }
    }

    /// Sends a message from `sender_id` to the user named `recipient_handle`.
    ///
    /// # Returns
    ///
    /// - `Ok(message)` - The stored, unseen message
    /// - `Err(RosterError::Validation(_))` - Title, text or attachments rejected
    /// - `Err(RosterError::NotFound)` - Sender or recipient does not exist
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "send_message", skip_all, err)
    )]
    pub async fn execute(
        &self,
        sender_id: i32,
        recipient_handle: &str,
        title: &str,
        text: &str,
        attachments: Vec<Attachment>,
    ) -> Result<Message, RosterError> {
        validate_message_title(title, &self.config)?;
        validate_message_text(text, &self.config)?;
        validate_attachments(&attachments, &self.config)?;

        self.users
            .find_by_id(sender_id)
            .await?
            .ok_or(RosterError::NotFound)?;

        let recipient = self
            .users
            .find_by_handle(recipient_handle.trim())
            .await?
            .ok_or(RosterError::NotFound)?;

        let message = self
            .message_repo
            .create(CreateMessage {
                sender_id,
                recipient_id: recipient.id,
                title: title.trim().to_owned(),
                text: text.to_owned(),
                attachments,
            })
            .await?;

        log::info!(
            target: "roster",
            "msg=\"message sent\", message_id={}, sender_id={sender_id}, recipient_id={}",
            message.id,
            recipient.id
        );

        dispatch(RosterEvent::MessageSent {
            message_id: message.id,
            sender_id,
            recipient_id: recipient.id,
            at: Utc::now(),
        })
        .await;

        Ok(message)
    }
}
