use crate::form::state::{FailureReason, SubmissionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Confirmation,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: Tone,
    pub text: &'static str,
    pub dismissible: bool,
}

/// What the waitlist form should show right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub button_label: &'static str,
    pub button_disabled: bool,
    pub notice: Option<Notice>,
}

/// Derive the form affordances from the submission state alone.
pub fn render(submission: &SubmissionState) -> Feedback {
    match submission {
        SubmissionState::Idle => Feedback {
            button_label: "Join Waitlist",
            button_disabled: false,
            notice: None,
        },
        SubmissionState::Validating | SubmissionState::Submitting => Feedback {
            button_label: "Joining...",
            button_disabled: true,
            notice: None,
        },
        SubmissionState::Success => Feedback {
            button_label: "Join Waitlist",
            button_disabled: false,
            notice: Some(Notice {
                tone: Tone::Confirmation,
                text: "You're on the list! We'll be in touch soon.",
                dismissible: false,
            }),
        },
        SubmissionState::Error(reason) => Feedback {
            button_label: "Join Waitlist",
            button_disabled: false,
            notice: Some(Notice {
                tone: Tone::Error,
                text: error_message(*reason),
                dismissible: true,
            }),
        },
    }
}

pub fn error_message(reason: FailureReason) -> &'static str {
    match reason {
        FailureReason::InvalidEmail => "Please enter a valid email address.",
        FailureReason::SubmissionFailed => "We couldn't add you to the waitlist. Please try again.",
    }
}
