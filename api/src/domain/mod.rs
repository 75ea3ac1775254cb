mod waitlist_entry;
mod waitlist_repository;

pub use waitlist_entry::{Registration, WaitlistEntry};
pub use waitlist_repository::WaitlistRepository;
