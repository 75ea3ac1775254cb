use chrono::{DateTime, Utc};
use uuid::Uuid;
use waitlist_intake::domain::WaitlistEmail;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub email: WaitlistEmail,
    pub created_at: DateTime<Utc>,
}

impl WaitlistEntry {
    pub fn new(email: WaitlistEmail) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            created_at: Utc::now(),
        }
    }
}

/// Result of asking the repository to add an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Created(WaitlistEntry),
    /// The address was already present; carries the original entry.
    AlreadyExists(WaitlistEntry),
}

impl Registration {
    pub fn entry(&self) -> &WaitlistEntry {
        match self {
            Registration::Created(entry) | Registration::AlreadyExists(entry) => entry,
        }
    }
}
