use crate::types::error::NicknameError;

/// Minimum nickname length in characters
pub const MIN_NICKNAME_LENGTH: usize = 3;

/// Maximum nickname length in characters
pub const MAX_NICKNAME_LENGTH: usize = 20;

/// Check a nickname against the length bounds and character rules.
///
/// A valid nickname is 3 to 20 characters long, starts with an ASCII letter
/// and continues with ASCII letters, digits, `_`, `-`, `[` or `]`.
pub fn validate_nickname(nickname: &str) -> Result<(), NicknameError> {
    let length = nickname.chars().count();
    if length < MIN_NICKNAME_LENGTH {
        return Err(NicknameError::TooShort);
    }
    if length > MAX_NICKNAME_LENGTH {
        return Err(NicknameError::TooLong);
    }

    let mut chars = nickname.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_with_letter || !chars.all(is_nickname_char) {
        return Err(NicknameError::InvalidCharacters);
    }

    Ok(())
}

fn is_nickname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '[' | ']')
}
