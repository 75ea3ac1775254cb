//! The waitlist form as a pure state machine plus a view derived from it.
mod msg;
mod state;
mod update;
mod view;

pub use msg::{Effect, Msg};
pub use state::{FailureReason, FormState, RequestId, SubmissionState};
pub use update::update;
pub use view::{error_message, render, Feedback, Notice, Tone};
