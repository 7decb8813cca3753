use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata of a file attached to a message. File contents are stored
/// elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i32,
    pub sender_id: i32,
    pub recipient_id: i32,
    pub title: String,
    pub text: String,
    pub attachments: Vec<Attachment>,
    pub sent_at: DateTime<Utc>,
    /// Set the first time the recipient opens the message.
    pub seen_at: Option<DateTime<Utc>>,
}

impl Message {
    pub fn is_seen(&self) -> bool {
        self.seen_at.is_some()
    }
}
