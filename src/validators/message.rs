use super::ValidationError;
use crate::config::MessageConfig;
use crate::messages::Attachment;

pub fn validate_message_title(title: &str, config: &MessageConfig) -> Result<(), ValidationError> {
    let trimmed = title.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::MessageTitleEmpty);
    }

    if trimmed.chars().count() > config.max_title_length {
        return Err(ValidationError::MessageTitleTooLong {
            max: config.max_title_length,
        });
    }

    Ok(())
}

pub fn validate_message_text(text: &str, config: &MessageConfig) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::MessageTextEmpty);
    }

    if text.chars().count() > config.max_text_length {
        return Err(ValidationError::MessageTextTooLong {
            max: config.max_text_length,
        });
    }

    Ok(())
}

pub fn validate_attachments(
    attachments: &[Attachment],
    config: &MessageConfig,
) -> Result<(), ValidationError> {
    if attachments.len() > config.max_attachments {
        return Err(ValidationError::TooManyAttachments {
            max: config.max_attachments,
        });
    }

    if attachments.iter().any(|a| a.file_name.trim().is_empty()) {
        return Err(ValidationError::AttachmentNameEmpty);
    }

    Ok(())
}
