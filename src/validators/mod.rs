pub mod message;
pub mod name;

pub use message::{validate_attachments, validate_message_text, validate_message_title};
pub use name::{validate_project_name, validate_team_name};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    TeamNameEmpty,
    TeamNameTooLong,
    ProjectNameEmpty,
    ProjectNameTooLong,
    TooManyHandles { max: usize },
    HandleTaken,
    MessageTitleEmpty,
    MessageTitleTooLong { max: usize },
    MessageTextEmpty,
    MessageTextTooLong { max: usize },
    TooManyAttachments { max: usize },
    AttachmentNameEmpty,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TeamNameEmpty => write!(f, "Team name cannot be empty"),
            Self::TeamNameTooLong => write!(f, "Team name is too long (max 100 characters)"),
            Self::ProjectNameEmpty => write!(f, "Project name cannot be empty"),
            Self::ProjectNameTooLong => {
                write!(f, "Project name is too long (max 100 characters)")
            }
            Self::TooManyHandles { max } => {
                write!(f, "Too many usernames in one request (max {max})")
            }
            Self::HandleTaken => write!(f, "Username is already taken"),
            Self::MessageTitleEmpty => write!(f, "Message title cannot be empty"),
            Self::MessageTitleTooLong { max } => {
                write!(f, "Message title is too long (max {max} characters)")
            }
            Self::MessageTextEmpty => write!(f, "Message text cannot be empty"),
            Self::MessageTextTooLong { max } => {
                write!(f, "Message text is too long (max {max} characters)")
            }
            Self::TooManyAttachments { max } => write!(f, "Too many attachments (max {max})"),
            Self::AttachmentNameEmpty => write!(f, "Attachment file name cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}
