use crate::domain::waitlist_entry::{Registration, WaitlistEntry};
use async_trait::async_trait;
use waitlist_intake::domain::WaitlistEmail;

#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    /// Add `email` unless it is already on the waitlist. Must be idempotent.
    async fn register(&self, email: &WaitlistEmail) -> Result<Registration, anyhow::Error>;

    async fn find_entry(
        &self,
        email: &WaitlistEmail,
    ) -> Result<Option<WaitlistEntry>, anyhow::Error>;

    async fn count(&self) -> Result<usize, anyhow::Error>;
}
