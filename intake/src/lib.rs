pub mod adapters;
pub mod configuration;
pub mod coordinator;
pub mod domain;
pub mod form;
pub mod utils;

pub use coordinator::WaitlistForm;
