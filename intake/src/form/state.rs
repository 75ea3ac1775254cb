/// Why the form ended up in [`SubmissionState::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    InvalidEmail,
    SubmissionFailed,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::InvalidEmail => "invalid-email",
            FailureReason::SubmissionFailed => "submission-failed",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Error(FailureReason),
}

impl SubmissionState {
    /// `Success` and `Error` hold until the visitor acts again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Success | SubmissionState::Error(_))
    }
}

/// Identifies one dispatched registration so late answers can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RequestId(u64);

impl RequestId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Everything the waitlist form remembers for one page view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub email: String,
    pub submission: SubmissionState,
    pub(crate) in_flight: Option<RequestId>,
    pub(crate) last_request: RequestId,
}

impl FormState {
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }
}
