use crate::utils::error_chain_fmt;

/// Longest address accepted, in characters.
pub const MAX_EMAIL_LENGTH: usize = 254;

#[derive(thiserror::Error, PartialEq, Eq, Clone)]
pub enum ValidationError {
    #[error("email address is empty")]
    Empty,
    #[error("email address is longer than 254 characters")]
    TooLong,
    #[error("email address contains whitespace")]
    EmbeddedWhitespace,
    #[error("email address must contain exactly one '@'")]
    AtSignCount,
    #[error("email address has nothing before the '@'")]
    MissingLocalPart,
    #[error("email domain must contain a '.'")]
    MissingDomainDot,
    #[error("email domain {0} is malformed")]
    MalformedDomain(String),
}

impl std::fmt::Debug for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// A syntactically valid, normalized (trimmed and lower-cased) address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WaitlistEmail(String);

impl WaitlistEmail {
    /// Trim, check, then lower-case `raw`.
    ///
    /// The check is deliberately conservative: it rejects obvious typos
    /// without trying to implement RFC 5322.
    pub fn parse(raw: &str) -> Result<WaitlistEmail, ValidationError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }
        if trimmed.chars().count() > MAX_EMAIL_LENGTH {
            return Err(ValidationError::TooLong);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::EmbeddedWhitespace);
        }

        let (local, domain) = trimmed
            .split_once('@')
            .ok_or(ValidationError::AtSignCount)?;
        if domain.contains('@') {
            return Err(ValidationError::AtSignCount);
        }
        if local.is_empty() {
            return Err(ValidationError::MissingLocalPart);
        }
        if !domain.contains('.') {
            return Err(ValidationError::MissingDomainDot);
        }
        if domain.split('.').any(str::is_empty) {
            return Err(ValidationError::MalformedDomain(domain.to_string()));
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn inner(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for WaitlistEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WaitlistEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
