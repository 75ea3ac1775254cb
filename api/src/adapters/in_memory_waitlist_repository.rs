use crate::domain::{Registration, WaitlistEntry, WaitlistRepository};
use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use waitlist_intake::domain::WaitlistEmail;

/// Waitlist kept in process memory, keyed by normalized email.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWaitlistRepository {
    entries: Arc<RwLock<HashMap<WaitlistEmail, WaitlistEntry>>>,
}

impl InMemoryWaitlistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WaitlistRepository for InMemoryWaitlistRepository {
    #[tracing::instrument(name = "Saving waitlist entry", skip(self))]
    async fn register(&self, email: &WaitlistEmail) -> Result<Registration, anyhow::Error> {
        let mut entries = self.entries.write().await;

        let registration = match entries.entry(email.clone()) {
            Entry::Occupied(existing) => Registration::AlreadyExists(existing.get().clone()),
            Entry::Vacant(slot) => {
                Registration::Created(slot.insert(WaitlistEntry::new(email.clone())).clone())
            }
        };

        Ok(registration)
    }

    #[tracing::instrument(skip(self))]
    async fn find_entry(
        &self,
        email: &WaitlistEmail,
    ) -> Result<Option<WaitlistEntry>, anyhow::Error> {
        Ok(self.entries.read().await.get(email).cloned())
    }

    async fn count(&self) -> Result<usize, anyhow::Error> {
        Ok(self.entries.read().await.len())
    }
}
