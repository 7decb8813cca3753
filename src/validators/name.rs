use super::ValidationError;

const MAX_NAME_LENGTH: usize = 100;

pub fn validate_team_name(name: &str) -> Result<(), ValidationError> {
    match check_name(name) {
        NameCheck::Empty => Err(ValidationError::TeamNameEmpty),
        NameCheck::TooLong => Err(ValidationError::TeamNameTooLong),
        NameCheck::Ok => Ok(()),
    }
}

pub fn validate_project_name(name: &str) -> Result<(), ValidationError> {
    match check_name(name) {
        NameCheck::Empty => Err(ValidationError::ProjectNameEmpty),
        NameCheck::TooLong => Err(ValidationError::ProjectNameTooLong),
        NameCheck::Ok => Ok(()),
    }
}

enum NameCheck {
    Empty,
    TooLong,
    Ok,
}

fn check_name(name: &str) -> NameCheck {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return NameCheck::Empty;
    }

    // counted in chars so multi-byte names get the same budget
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return NameCheck::TooLong;
    }

    NameCheck::Ok
}
