//! Shape checks run on form input before anything is sent over the network.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::Credentials;

pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MIN_ENTRY_CHARS: usize = 30;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern is valid")
});

/// A form field failed its shape check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("email is not well formed")]
    Email,
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
    #[error("text must be at least 30 characters")]
    TextTooShort,
}

/// Checks a login submission. The e-mail is trimmed; the password is taken as typed.
pub fn credentials(email: &str, password: &str) -> Result<Credentials, ValidationError> {
    let email = email.trim();
    if !EMAIL.is_match(email) {
        return Err(ValidationError::Email);
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Checks a dashboard submission and returns the trimmed text to summarize.
pub fn entry_text(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_ENTRY_CHARS {
        return Err(ValidationError::TextTooShort);
    }
    Ok(trimmed)
}
