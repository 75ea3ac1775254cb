use crate::domain::{RegistrationOutcome, SubmissionError, WaitlistEmail};
use crate::form::state::RequestId;

#[derive(Debug)]
pub enum Msg {
    /// The field text changed; carries the full new value.
    EmailChanged(String),
    /// The form was submitted with exactly this field text.
    Submitted { email: String },
    /// The registration dispatched as `request` finished.
    RegistrationResolved {
        request: RequestId,
        result: Result<RegistrationOutcome, SubmissionError>,
    },
    /// The visitor closed the error message.
    ErrorDismissed,
}

/// Side effects requested by [`crate::form::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Register {
        request: RequestId,
        email: WaitlistEmail,
    },
}
