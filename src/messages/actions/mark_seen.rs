use chrono::Utc;

use crate::events::{dispatch, RosterEvent};
use crate::messages::{Message, MessageRepository};
use crate::RosterError;

/// Action for a recipient to mark a message as seen.
///
/// Marking twice keeps the first timestamp and emits no second event.
pub struct MarkSeenAction<M: MessageRepository> {
    message_repo: M,
}

impl<M: MessageRepository> MarkSeenAction<M> {
    pub fn new(message_repo: M) -> Self {
        Self { message_repo }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "mark_message_seen", skip_all, err)
    )]
    pub async fn execute(&self, message_id: i32, reader_id: i32) -> Result<Message, RosterError> {
        let message = self
            .message_repo
            .find_by_id(message_id)
            .await?
            .ok_or(RosterError::NotFound)?;

        if message.recipient_id != reader_id {
            log::info!(
                target: "roster",
                "msg=\"mark seen denied\", message_id={message_id}, reader_id={reader_id}"
            );
            return Err(RosterError::Forbidden);
        }

        if message.is_seen() {
            return Ok(message);
        }

        let message = self.message_repo.mark_seen(message_id).await?;

        dispatch(RosterEvent::MessageSeen {
            message_id,
            recipient_id: reader_id,
            at: Utc::now(),
        })
        .await;

        Ok(message)
    }
}
