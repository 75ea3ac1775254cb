mod registration;
mod waitlist_email;

pub use registration::{RegistrationOutcome, SubmissionError, WaitlistClient};
pub use waitlist_email::{ValidationError, WaitlistEmail, MAX_EMAIL_LENGTH};
