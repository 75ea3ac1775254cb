use crate::domain::waitlist_email::WaitlistEmail;
use crate::utils::error_chain_fmt;
use async_trait::async_trait;
use std::time::Duration;

/// What the waitlist service reported for a registration.
///
/// Both outcomes are successes from the visitor's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Created,
    AlreadyExists,
}

#[derive(thiserror::Error)]
pub enum SubmissionError {
    #[error("waitlist service did not answer within {0:?}")]
    Timeout(Duration),
    #[error("failed to reach the waitlist service")]
    Transport(#[source] reqwest::Error),
    #[error("waitlist service rejected the registration with status {0}")]
    Rejected(u16),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[async_trait]
pub trait WaitlistClient: Send + Sync {
    async fn register(
        &self,
        email: &WaitlistEmail,
    ) -> Result<RegistrationOutcome, SubmissionError>;
}
