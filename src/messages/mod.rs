//! Direct messages between users.
//!
//! A message goes from one user to another, addressed by the recipient's
//! handle, and is marked seen by the recipient at most once.

mod actions;
mod memory;
mod repository;
mod types;

pub use actions::{MarkSeenAction, SendMessageAction};
pub use memory::InMemoryMessageRepository;
pub use repository::{CreateMessage, MessageRepository};
pub use types::{Attachment, Message};
