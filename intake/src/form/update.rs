use crate::domain::WaitlistEmail;
use crate::form::msg::{Effect, Msg};
use crate::form::state::{FailureReason, FormState, SubmissionState};

/// Apply `msg` to `state` and return the effect the caller must run, if any.
///
/// This is the only place `SubmissionState` changes. It never performs I/O.
pub fn update(state: &mut FormState, msg: Msg) -> Option<Effect> {
    match msg {
        Msg::EmailChanged(raw) => {
            state.email = raw;
            if state.submission.is_terminal() {
                state.submission = SubmissionState::Idle;
            }
            None
        }
        Msg::Submitted { email } => submit(state, email),
        Msg::RegistrationResolved { request, result } => {
            if state.in_flight != Some(request) {
                tracing::debug!(%request, "Ignoring a registration result nobody is waiting for");
                return None;
            }
            state.in_flight = None;
            state.submission = match result {
                Ok(outcome) => {
                    tracing::info!(%request, ?outcome, "Waitlist registration accepted");
                    SubmissionState::Success
                }
                Err(e) => {
                    tracing::warn!(%request, error.cause_chain = ?e, error.message = %e, "Waitlist registration failed");
                    SubmissionState::Error(FailureReason::SubmissionFailed)
                }
            };
            None
        }
        Msg::ErrorDismissed => {
            if let SubmissionState::Error(_) = state.submission {
                state.submission = SubmissionState::Idle;
            }
            None
        }
    }
}

fn submit(state: &mut FormState, email: String) -> Option<Effect> {
    match state.submission {
        SubmissionState::Validating | SubmissionState::Submitting => {
            tracing::debug!("Submission already in progress, ignoring submit");
            return None;
        }
        // Nothing new to register until the address is edited.
        SubmissionState::Success => return None,
        SubmissionState::Idle | SubmissionState::Error(_) => {}
    }

    state.email = email;
    state.submission = SubmissionState::Validating;

    match WaitlistEmail::parse(&state.email) {
        Err(e) => {
            tracing::info!(error.message = %e, "Rejected waitlist email");
            state.submission = SubmissionState::Error(FailureReason::InvalidEmail);
            None
        }
        Ok(email) => {
            let request = state.last_request.next();
            state.last_request = request;
            state.in_flight = Some(request);
            state.submission = SubmissionState::Submitting;
            Some(Effect::Register { request, email })
        }
    }
}
