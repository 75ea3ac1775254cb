mod in_memory_waitlist_repository;

pub use in_memory_waitlist_repository::InMemoryWaitlistRepository;
